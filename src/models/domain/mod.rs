pub mod extraction;
pub mod generation;
pub mod mode;
pub mod quiz;
pub mod video;

pub use extraction::{ExtractionResult, FileHandle, PromptPart, UploadedFile};
pub use generation::{GenerationBody, GenerationResult, ProcessingRequest};
pub use mode::ProcessingMode;
pub use quiz::{QuizData, QuizOutcome};
pub use video::{VideoSearchQuery, VideoStatistics};
