//! Application layer for study-buddy
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    llm_gateway::{ModelGateway, ProviderError, TextGateway},
    map_renderer::{MapRenderer, RenderedImage},
    progress::{GenerationProgress, NoProgress},
};
pub use use_cases::chat::ChatReplyUseCase;
pub use use_cases::concept_map::GenerateConceptMapUseCase;
pub use use_cases::flashcards::GenerateFlashcardsUseCase;
pub use use_cases::generate_text::{GenerationError, GenerationOrchestrator, RetryPolicy};
pub use use_cases::quiz::GenerateQuizUseCase;
pub use use_cases::render_map::{RenderMapUseCase, RenderedMap};
pub use use_cases::select_models::ModelSelector;
pub use use_cases::summarize::SummarizeUseCase;
