use std::sync::Arc;

use crate::{
    clients::GenerativeModel,
    errors::{AppError, AppResult},
    models::domain::{ExtractionResult, UploadedFile},
};

const PDF_MIME: &str = "application/pdf";
const MEDIA_PREFIXES: [&str; 3] = ["image/", "audio/", "video/"];

pub struct ContentExtractor {
    model: Arc<dyn GenerativeModel>,
}

impl ContentExtractor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Turns an upload into prompt material. The staged file is deleted before
    /// this returns, whether extraction succeeded or not.
    pub async fn extract(&self, upload: UploadedFile) -> AppResult<ExtractionResult> {
        log::info!("Extracting {} ({})", upload.file_name(), upload.mime_type());

        let result = self.extract_staged(&upload).await;
        upload.discard();
        result
    }

    async fn extract_staged(&self, upload: &UploadedFile) -> AppResult<ExtractionResult> {
        let mime_type = upload.mime_type();

        if mime_type == PDF_MIME {
            let bytes = tokio::fs::read(upload.path()).await.map_err(|e| {
                AppError::Extraction(format!("Failed to read staged upload: {}", e))
            })?;
            let text = extract_pdf_text(bytes).await?;
            return Ok(ExtractionResult::Text(text));
        }

        if MEDIA_PREFIXES.iter().any(|prefix| mime_type.starts_with(prefix)) {
            let handle = self
                .model
                .upload_file(upload.path(), mime_type, upload.file_name())
                .await?;
            return Ok(ExtractionResult::FileReference(handle));
        }

        Err(AppError::UnsupportedMediaType(mime_type.to_string()))
    }
}

/// Runs the PDF parser on the blocking pool; parser panics on malformed
/// documents surface as extraction errors.
async fn extract_pdf_text(bytes: Vec<u8>) -> AppResult<String> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Extraction(format!("PDF parser aborted: {}", e)))?
        .map_err(|e| AppError::Extraction(format!("Failed to extract PDF text: {}", e)))
}
