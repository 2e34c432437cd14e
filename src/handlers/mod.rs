pub mod generation_handler;
pub mod health_handler;
pub mod pdf_handler;

use actix_multipart::{
    form::{tempfile::TempFileConfig, MultipartFormConfig},
    MultipartError,
};
use actix_web::{
    error::{JsonPayloadError, PayloadError, UrlencodedError},
    guard, http::header, web, HttpRequest,
};

use crate::{config::Config, errors::AppError};

pub use generation_handler::{unsupported_body, upload_json, upload_multipart, upload_urlencoded};
pub use health_handler::{health_check, health_check_live};
pub use pdf_handler::generate_pdf;

/// Registers every route plus the extractor limits derived from `config`.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(json_config(config))
        .app_data(form_config(config))
        .app_data(multipart_config(config))
        .app_data(TempFileConfig::default().directory(&config.upload_dir))
        .service(
            web::resource("/upload")
                .route(web::post().guard(guard::fn_guard(is_json)).to(upload_json))
                .route(
                    web::post()
                        .guard(guard::fn_guard(is_urlencoded))
                        .to(upload_urlencoded),
                )
                .route(
                    web::post()
                        .guard(guard::fn_guard(is_multipart))
                        .to(upload_multipart),
                )
                .route(web::post().to(unsupported_body)),
        )
        .service(generate_pdf)
        .service(health_check)
        .service(health_check_live);
}

fn json_config(config: &Config) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(config.max_pdf_text_bytes)
        .error_handler(json_error)
}

fn form_config(config: &Config) -> web::FormConfig {
    web::FormConfig::default()
        .limit(config.max_pdf_text_bytes)
        .error_handler(form_error)
}

fn multipart_config(config: &Config) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(config.max_upload_bytes)
        .memory_limit(config.max_upload_bytes)
        .error_handler(multipart_error)
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body on {}: {}", req.path(), err);
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            AppError::PayloadTooLarge(err.to_string()).into()
        }
        _ => AppError::InvalidRequest("Invalid JSON body.".to_string()).into(),
    }
}

fn form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected form body on {}: {}", req.path(), err);
    match err {
        UrlencodedError::Overflow { .. } => AppError::PayloadTooLarge(err.to_string()).into(),
        _ => AppError::InvalidRequest("Invalid form body.".to_string()).into(),
    }
}

fn multipart_error(err: MultipartError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected multipart body on {}: {}", req.path(), err);
    match err {
        MultipartError::Payload(PayloadError::Overflow) => {
            AppError::PayloadTooLarge(err.to_string()).into()
        }
        _ => AppError::InvalidRequest("Invalid multipart body.".to_string()).into(),
    }
}

/// Media type of the request without parameters, lowercased.
fn essence(ctx: &guard::GuardContext<'_>) -> Option<String> {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().to_ascii_lowercase())
}

fn is_json(ctx: &guard::GuardContext<'_>) -> bool {
    essence(ctx).is_some_and(|essence| essence == "application/json")
}

fn is_urlencoded(ctx: &guard::GuardContext<'_>) -> bool {
    essence(ctx).is_some_and(|essence| essence == "application/x-www-form-urlencoded")
}

// a multipart body without a boundary cannot be parsed
fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    let has_boundary = ctx
        .head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("boundary="));

    has_boundary && essence(ctx).is_some_and(|essence| essence == "multipart/form-data")
}
