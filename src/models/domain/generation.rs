use crate::models::domain::{extraction::UploadedFile, mode::ProcessingMode, quiz::QuizData};

pub const DEFAULT_QUIZ_SIZE: u32 = 5;
pub const MAX_QUIZ_SIZE: u32 = 50;

/// A validated `/upload` request. At least one of `file` or `user_input` is set.
#[derive(Debug)]
pub struct ProcessingRequest {
    pub mode: ProcessingMode,
    pub user_input: Option<String>,
    pub quiz_size: u32,
    pub file: Option<UploadedFile>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GenerationBody {
    Formatted { output: String },
    Quiz(QuizData),
    /// Quiz output that could not be parsed, shown as formatted text instead.
    QuizFallback { output: String },
    Teach { output: String, video_urls: Vec<String> },
}

/// Everything produced for one request; serialized straight into the response.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResult {
    pub processed_text: String,
    pub body: GenerationBody,
}
