use serde::Serialize;

use crate::models::domain::{GenerationBody, GenerationResult, QuizData};

/// JSON body returned by `POST /upload` on success.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_data: Option<QuizData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl From<GenerationResult> for GenerationResponse {
    fn from(result: GenerationResult) -> Self {
        let mut response = GenerationResponse {
            success: true,
            output: None,
            quiz_data: None,
            video_urls: None,
            processed_text: Some(result.processed_text),
            fallback: None,
        };

        match result.body {
            GenerationBody::Formatted { output } => response.output = Some(output),
            GenerationBody::Quiz(data) => response.quiz_data = Some(data),
            GenerationBody::QuizFallback { output } => {
                response.output = Some(output);
                response.fallback = Some(true);
            }
            GenerationBody::Teach { output, video_urls } => {
                response.output = Some(output);
                response.video_urls = Some(video_urls);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_quiz_has_no_fallback_field() {
        let result = GenerationResult {
            processed_text: r#"{"questions":[]}"#.to_string(),
            body: GenerationBody::Quiz(QuizData::parse(r#"{"questions":[]}"#).unwrap()),
        };

        let json = serde_json::to_value(GenerationResponse::from(result)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["quizData"]["questions"], serde_json::json!([]));
        assert!(json.get("fallback").is_none());
        assert!(json.get("output").is_none());
    }

    #[test]
    fn fallback_quiz_is_flagged() {
        let result = GenerationResult {
            processed_text: "Q1: *cells*".to_string(),
            body: GenerationBody::QuizFallback {
                output: "Q1: <b>cells</b>".to_string(),
            },
        };

        let json = serde_json::to_value(GenerationResponse::from(result)).unwrap();
        assert_eq!(json["fallback"], true);
        assert_eq!(json["output"], "Q1: <b>cells</b>");
        assert_eq!(json["processedText"], "Q1: *cells*");
        assert!(json.get("quizData").is_none());
    }

    #[test]
    fn teach_response_lists_videos() {
        let result = GenerationResult {
            processed_text: "raw".to_string(),
            body: GenerationBody::Teach {
                output: "raw".to_string(),
                video_urls: vec![],
            },
        };

        let json = serde_json::to_value(GenerationResponse::from(result)).unwrap();
        assert_eq!(json["videoUrls"], serde_json::json!([]));
    }
}
