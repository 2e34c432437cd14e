use actix_web::{http::header, post, web, HttpResponse};

use crate::{errors::AppError, models::dto::request::PdfRequest, services::pdf_service::render_pdf};

#[post("/generate-pdf")]
async fn generate_pdf(request: web::Json<PdfRequest>) -> Result<HttpResponse, AppError> {
    let text = request.into_inner().text;
    let bytes = web::block(move || render_pdf(&text)).await??;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"output.pdf\"",
        ))
        .body(bytes))
}
