//! Domain layer for study-buddy
//!
//! This crate contains the core study logic, artifacts, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Study artifacts
//!
//! Chat replies, summaries, quizzes, flashcard decks and concept graphs.
//! Each artifact validates its own shape and knows its offline fallback:
//!
//! - **Quiz**: exactly 10 questions of 4 options, else a template quiz
//! - **Flashcards**: a non-empty deck, else a diagnostic deck
//! - **Concept graph**: a root plus edges, else a diagnostic graph
//!
//! ## Generation
//!
//! Provider-neutral request/response values, model catalog ranking, and
//! tolerant parsing of model output into typed artifacts.
//!
//! ## Graph rendering
//!
//! Filtering, layout and styling of concept graphs into a render-neutral
//! [`MapScene`]. Encoding the scene as an image is left to adapters.

pub mod core;
pub mod generation;
pub mod graph;
pub mod prompt;
pub mod providers;
pub mod study;

// Re-export commonly used types
pub use core::error::DomainError;
pub use generation::{
    RATE_LIMIT_MARKER,
    model_ranking::{CatalogModel, ModelDescriptor, RankingPolicy},
    normalize::{clean, parse_structured},
    value_objects::{GeneratedText, GenerationRequest},
};
pub use graph::{
    layout::{LayoutOutcome, Point, compute_layout},
    layout_graph::LayoutGraph,
    scene::{MapScene, build_scene},
};
pub use prompt::StudyPromptTemplate;
pub use providers::{
    GeminiProviderConfig, GenerationPolicy, HuggingFaceProviderConfig, PollinationsProviderConfig,
    ProviderConfig,
};
pub use study::{
    NO_PROVIDER_ATTEMPTED,
    concept_map::{ConceptEdge, ConceptGraph, LayoutKind, canned_hierarchy},
    flashcards::{Flashcard, FlashcardDeck},
    quiz::{QuizDocument, QuizQuestion},
};
