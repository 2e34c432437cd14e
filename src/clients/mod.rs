pub mod gemini_client;
pub mod youtube_client;

use reqwest::Response;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

pub use gemini_client::{GeminiClient, GenerativeModel};
pub use youtube_client::{VideoProvider, YouTubeClient};

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Passes 2xx responses through and turns anything else into `to_error`,
/// preferring the `error.message` of a Google API error body.
pub(crate) async fn ensure_success(
    response: Response,
    service: &str,
    to_error: fn(String) -> AppError,
) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read response body".to_string());
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|err| err.error.message)
        .unwrap_or(body);

    Err(to_error(format!("{} returned {}: {}", service, status, message)))
}
