//! Study artifacts produced by the content generators.
//!
//! Every artifact type owns its shape invariant (`validated`) and its
//! deterministic offline fallback, so success and fallback values always
//! look the same to callers.

pub mod concept_map;
pub mod flashcards;
pub mod quiz;
pub mod replies;

/// Stand-in for "last error" when generation failed before any provider ran
pub const NO_PROVIDER_ATTEMPTED: &str = "no provider attempted";
