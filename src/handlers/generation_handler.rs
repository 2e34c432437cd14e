use actix_multipart::form::MultipartForm;
use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::UploadedFile,
        dto::{
            request::{GenerateJsonRequest, GenerationRequestDto, UploadForm},
            response::GenerationResponse,
        },
    },
};

/// `POST /upload` with a `multipart/form-data` body.
pub async fn upload_multipart(
    state: web::Data<AppState>,
    req: HttpRequest,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<HttpResponse, AppError> {
    let (dto, file) = form.into_parts()?;
    generate(&state, &req, dto, file).await
}

/// `POST /upload` with an `application/json` body. No file can be attached.
pub async fn upload_json(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateJsonRequest>,
) -> Result<HttpResponse, AppError> {
    let dto = GenerationRequestDto::try_from(request.into_inner())?;
    generate(&state, &req, dto, None).await
}

/// `POST /upload` with an `application/x-www-form-urlencoded` body.
pub async fn upload_urlencoded(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<GenerateJsonRequest>,
) -> Result<HttpResponse, AppError> {
    let dto = GenerationRequestDto::try_from(form.into_inner())?;
    generate(&state, &req, dto, None).await
}

/// Fallback for `POST /upload` bodies no other route accepts.
pub async fn unsupported_body(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("none");
    log::warn!("Unsupported /upload content type: {}", content_type);

    Err(AppError::InvalidRequest(
        "Unsupported request body. Send multipart/form-data, JSON or a URL-encoded form."
            .to_string(),
    ))
}

async fn generate(
    state: &AppState,
    req: &HttpRequest,
    dto: GenerationRequestDto,
    file: Option<UploadedFile>,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(req).unwrap_or_else(|| "-".to_string());
    let request = dto.into_processing_request(file)?;
    log::info!("[{}] /upload mode={}", request_id, request.mode);

    let result = state.generation_service.generate(request).await?;
    Ok(HttpResponse::Ok().json(GenerationResponse::from(result)))
}
