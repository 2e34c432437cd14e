use std::sync::Arc;

use crate::{
    clients::{GenerativeModel, VideoProvider},
    errors::AppResult,
    models::domain::{
        ExtractionResult, GenerationBody, GenerationResult, ProcessingMode, ProcessingRequest,
        PromptPart, QuizOutcome,
    },
    services::{
        content_extractor::ContentExtractor,
        output_formatter::format,
        prompt_builder::{build_prompt, build_video_query_prompt, with_additional_input},
        text_normalizer::normalize,
        video_search_service::VideoSearchService,
    },
};

/// Runs one `/upload` request end to end: extraction, prompt construction,
/// model call and mode-specific response shaping.
pub struct GenerationService {
    model: Arc<dyn GenerativeModel>,
    extractor: ContentExtractor,
    videos: VideoSearchService,
}

impl GenerationService {
    pub fn new(model: Arc<dyn GenerativeModel>, video_provider: Arc<dyn VideoProvider>) -> Self {
        Self {
            extractor: ContentExtractor::new(Arc::clone(&model)),
            videos: VideoSearchService::new(video_provider),
            model,
        }
    }

    pub async fn generate(&self, request: ProcessingRequest) -> AppResult<GenerationResult> {
        let ProcessingRequest {
            mode,
            user_input,
            quiz_size,
            file,
        } = request;

        log::info!(
            "Generating {} (file: {}, text: {})",
            mode,
            file.is_some(),
            user_input.is_some()
        );

        let (text, file_handle) = match file {
            Some(upload) => {
                let (extracted, handle) = match self.extractor.extract(upload).await? {
                    ExtractionResult::Text(text) => (text, None),
                    ExtractionResult::FileReference(handle) => (String::new(), Some(handle)),
                };
                let combined = match user_input.as_deref() {
                    Some(input) => with_additional_input(input, &extracted),
                    None => extracted,
                };
                (combined, handle)
            }
            None => (user_input.unwrap_or_default(), None),
        };

        let prompt = build_prompt(mode, &normalize(&text), quiz_size);

        let mut parts = Vec::with_capacity(2);
        if let Some(handle) = file_handle {
            parts.push(PromptPart::File(handle));
        }
        parts.push(PromptPart::Text(prompt));

        let raw = self.model.generate(parts).await?;

        let body = match mode {
            ProcessingMode::Quiz => match QuizOutcome::from_model_output(&raw) {
                QuizOutcome::Parsed(data) => GenerationBody::Quiz(data),
                QuizOutcome::FallbackText(text) => GenerationBody::QuizFallback {
                    output: format(&text),
                },
            },
            ProcessingMode::Teach => GenerationBody::Teach {
                output: format(&raw),
                video_urls: self.related_videos(&raw).await?,
            },
            ProcessingMode::Notes | ProcessingMode::Analyze => GenerationBody::Formatted {
                output: format(&raw),
            },
        };

        Ok(GenerationResult {
            processed_text: raw,
            body,
        })
    }

    /// Asks the model for a short search query, then looks up videos for it.
    /// A failed video search yields no videos instead of failing the request.
    async fn related_videos(&self, generated: &str) -> AppResult<Vec<String>> {
        let query = self
            .model
            .generate(vec![PromptPart::Text(build_video_query_prompt(generated))])
            .await?;
        let query = query.trim();

        if query.is_empty() {
            log::warn!("Model returned an empty video search query");
            return Ok(Vec::new());
        }

        match self.videos.search_videos(query).await {
            Ok(urls) => Ok(urls),
            Err(e) => {
                log::warn!("Video search failed, continuing without videos: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
