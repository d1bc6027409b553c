//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat;
pub mod concept_map;
pub mod flashcards;
pub mod generate_text;
pub mod quiz;
pub mod render_map;
pub mod select_models;
pub(crate) mod shared;
pub mod summarize;
