use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{FileHandle, PromptPart},
};

use super::ensure_success;

const SERVICE_NAME: &str = "Gemini API";
const API_KEY_HEADER: &str = "x-goog-api-key";
const FILE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Generative-language collaborator: text generation plus a file store for
/// media the model reads by reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, parts: Vec<PromptPart>) -> AppResult<String>;
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> AppResult<FileHandle>;
}

pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    activation_timeout: Duration,
}

impl GeminiClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
            activation_timeout: config.file_activation_timeout(),
        }
    }

    async fn start_upload(
        &self,
        size: usize,
        mime_type: &str,
        display_name: &str,
    ) -> AppResult<String> {
        let response = self
            .http
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", size.to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&serde_json::json!({ "file": { "display_name": display_name } }))
            .send()
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to start file upload: {}", e)))?;

        let response = ensure_success(response, SERVICE_NAME, AppError::Extraction).await?;

        response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Extraction("File store did not return an upload URL".to_string())
            })
    }

    async fn wait_until_active(&self, mut file: FileResource) -> AppResult<FileResource> {
        let deadline = tokio::time::Instant::now() + self.activation_timeout;

        loop {
            match file.state.as_deref() {
                None | Some("ACTIVE") | Some("STATE_UNSPECIFIED") => return Ok(file),
                Some("FAILED") => {
                    return Err(AppError::Extraction(format!(
                        "File store failed to process {}",
                        file.name
                    )))
                }
                Some(state) => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(AppError::Extraction(format!(
                            "File {} still {} after {:?}",
                            file.name, state, self.activation_timeout
                        )));
                    }
                    log::debug!("Waiting for uploaded file {} (state {})", file.name, state);
                    tokio::time::sleep(FILE_POLL_INTERVAL).await;
                }
            }

            let response = self
                .http
                .get(format!("{}/v1beta/{}", self.base_url, file.name))
                .header(API_KEY_HEADER, self.api_key.expose_secret())
                .send()
                .await
                .map_err(|e| AppError::Extraction(format!("Failed to poll file state: {}", e)))?;

            file = ensure_success(response, SERVICE_NAME, AppError::Extraction)
                .await?
                .json::<FileResource>()
                .await
                .map_err(|e| AppError::Extraction(format!("Invalid file metadata: {}", e)))?;
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, parts: Vec<PromptPart>) -> AppResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: parts.into_iter().map(Part::from).collect(),
            }],
        };

        log::debug!("Calling {} generateContent", self.model);

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("Request to model failed: {}", e)))?;

        let body: GenerateContentResponse = ensure_success(response, SERVICE_NAME, AppError::Model)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Invalid model response: {}", e)))?;

        body.into_text()
    }

    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> AppResult<FileHandle> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to read staged upload: {}", e)))?;
        let upload_url = self.start_upload(bytes.len(), mime_type, display_name).await?;

        let response = self
            .http
            .post(upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Extraction(format!("Failed to upload file bytes: {}", e)))?;

        let uploaded: UploadFileResponse =
            ensure_success(response, SERVICE_NAME, AppError::Extraction)
                .await?
                .json()
                .await
                .map_err(|e| AppError::Extraction(format!("Invalid upload response: {}", e)))?;

        let file = self.wait_until_active(uploaded.file).await?;
        log::info!("Uploaded {} to model file store as {}", display_name, file.name);

        Ok(FileHandle {
            mime_type: file.mime_type.unwrap_or_else(|| mime_type.to_string()),
            name: file.name,
            uri: file.uri,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    FileData(FileData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

impl From<PromptPart> for Part {
    fn from(part: PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => Part::Text(text),
            PromptPart::File(handle) => Part::FileData(FileData {
                mime_type: handle.mime_type,
                file_uri: handle.uri,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> AppResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AppError::Model(format!("Prompt was blocked: {}", reason)));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Model("Model returned no text".to_string()));
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct UploadFileResponse {
    file: FileResource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    name: String,
    uri: String,
    mime_type: Option<String>,
    state: Option<String>,
}
