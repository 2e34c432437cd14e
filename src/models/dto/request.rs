use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::generation::DEFAULT_QUIZ_SIZE;
use crate::models::domain::{ProcessingMode, ProcessingRequest, UploadedFile};

/// `multipart/form-data` body of `POST /upload`.
#[derive(MultipartForm)]
pub struct UploadForm {
    pub file: Option<TempFile>,
    #[multipart(rename = "userInput")]
    pub user_input: Option<Text<String>>,
    pub option: Option<Text<String>>,
    #[multipart(rename = "quizSize")]
    pub quiz_size: Option<Text<String>>,
}

impl UploadForm {
    pub fn into_parts(self) -> AppResult<(GenerationRequestDto, Option<UploadedFile>)> {
        let quiz_size = match self.quiz_size.map(Text::into_inner) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_quiz_size(raw.trim())?),
            _ => None,
        };

        let dto = GenerationRequestDto {
            user_input: self.user_input.map(Text::into_inner),
            option: self.option.map(Text::into_inner),
            quiz_size,
        };

        // browsers submit an empty part when no file was chosen
        let file = self.file.filter(|f| f.size > 0).map(|f| {
            let mime_type = f
                .content_type
                .as_ref()
                .map(|mime| mime.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = f.file_name.clone().unwrap_or_else(|| "upload".to_string());
            UploadedFile::new(f.file, mime_type, file_name)
        });

        Ok((dto, file))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizSizeField {
    Number(i64),
    Text(String),
}

/// `application/json` body of `POST /upload`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateJsonRequest {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub quiz_size: Option<QuizSizeField>,
}

impl TryFrom<GenerateJsonRequest> for GenerationRequestDto {
    type Error = AppError;

    fn try_from(request: GenerateJsonRequest) -> AppResult<Self> {
        let quiz_size = match request.quiz_size {
            Some(QuizSizeField::Number(n)) => {
                Some(u32::try_from(n).map_err(|_| quiz_size_error())?)
            }
            Some(QuizSizeField::Text(raw)) if !raw.trim().is_empty() => {
                Some(parse_quiz_size(raw.trim())?)
            }
            _ => None,
        };

        Ok(GenerationRequestDto {
            user_input: request.user_input,
            option: request.option,
            quiz_size,
        })
    }
}

/// Transport-independent form of an `/upload` request before validation.
#[derive(Debug, Clone, Default, Validate)]
pub struct GenerationRequestDto {
    pub user_input: Option<String>,
    pub option: Option<String>,
    #[validate(range(min = 1, max = 50, message = "Quiz size must be between 1 and 50."))]
    pub quiz_size: Option<u32>,
}

impl GenerationRequestDto {
    pub fn into_processing_request(
        self,
        file: Option<UploadedFile>,
    ) -> AppResult<ProcessingRequest> {
        let user_input = self
            .user_input
            .as_deref()
            .map(str::trim)
            .filter(|input| !input.is_empty())
            .map(str::to_string);

        if file.is_none() && user_input.is_none() {
            return Err(AppError::InvalidRequest("No file or input provided.".to_string()));
        }

        let option = self
            .option
            .as_deref()
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("No option selected.".to_string()))?;

        self.validate()?;
        Ok(ProcessingRequest {
            mode: ProcessingMode::from_option(option),
            user_input,
            quiz_size: self.quiz_size.unwrap_or(DEFAULT_QUIZ_SIZE),
            file,
        })
    }
}

/// `application/json` body of `POST /generate-pdf`.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfRequest {
    pub text: String,
}

fn parse_quiz_size(raw: &str) -> AppResult<u32> {
    raw.parse::<u32>().map_err(|_| quiz_size_error())
}

fn quiz_size_error() -> AppError {
    AppError::InvalidRequest("Quiz size must be a positive integer.".to_string())
}
