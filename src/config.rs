use std::{env, path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub youtube_api_key: SecretString,
    pub youtube_base_url: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub max_pdf_text_bytes: usize,
    pub http_timeout_secs: u64,
    pub file_activation_timeout_secs: u64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: SecretString::from(env::var("API_KEY").unwrap_or_default()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            youtube_api_key: SecretString::from(env::var("YOUTUBE_API_KEY").unwrap_or_default()),
            youtube_base_url: env::var("YOUTUBE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_BASE_URL.to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parse_env("PORT", 3000),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 25 * 1024 * 1024),
            max_pdf_text_bytes: parse_env("MAX_PDF_TEXT_BYTES", 1024 * 1024),
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 120),
            file_activation_timeout_secs: parse_env("FILE_ACTIVATION_TIMEOUT_SECS", 60),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Fails when a credential the server cannot run without is missing.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::Configuration(
                "API_KEY is not set. Provide the generative model API key.".to_string(),
            ));
        }

        if self.youtube_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::Configuration(
                "YOUTUBE_API_KEY is not set. Provide the video search API key.".to_string(),
            ));
        }

        if self.max_upload_bytes == 0 || self.max_pdf_text_bytes == 0 {
            return Err(AppError::Configuration(
                "Size limits must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn file_activation_timeout(&self) -> Duration {
        Duration::from_secs(self.file_activation_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test-gemini-key".to_string()),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            youtube_api_key: SecretString::from("test-youtube-key".to_string()),
            youtube_base_url: "http://127.0.0.1:9".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            upload_dir: env::temp_dir(),
            max_upload_bytes: 1024 * 1024,
            max_pdf_text_bytes: 64 * 1024,
            http_timeout_secs: 5,
            file_activation_timeout_secs: 1,
            cors_allowed_origin: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
