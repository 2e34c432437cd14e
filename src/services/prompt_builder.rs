use crate::constants::prompts::{
    ADDITIONAL_INPUT_PREFIX, ANALYZE_PROMPT, NOTES_PROMPT, QUIZ_PROMPT, TEACH_PROMPT,
    VIDEO_QUERY_PROMPT,
};
use crate::models::domain::ProcessingMode;

pub fn build_prompt(mode: ProcessingMode, text: &str, quiz_size: u32) -> String {
    match mode {
        ProcessingMode::Quiz => QUIZ_PROMPT
            .replace("{quiz_size}", &quiz_size.to_string())
            .replace("{text}", text),
        ProcessingMode::Notes => NOTES_PROMPT.replace("{text}", text),
        ProcessingMode::Teach => TEACH_PROMPT.replace("{text}", text),
        ProcessingMode::Analyze => ANALYZE_PROMPT.replace("{text}", text),
    }
}

/// Labels the user's free text and puts it ahead of the extracted document text.
pub fn with_additional_input(user_input: &str, extracted: &str) -> String {
    format!("{}{}\n\n{}", ADDITIONAL_INPUT_PREFIX, user_input, extracted)
}

pub fn build_video_query_prompt(generated: &str) -> String {
    VIDEO_QUERY_PROMPT.replace("{text}", generated.trim())
}
