pub mod content_extractor;
pub mod generation_service;
pub mod output_formatter;
pub mod pdf_service;
pub mod prompt_builder;
pub mod text_normalizer;
pub mod video_search_service;
