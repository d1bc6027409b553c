//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// None of these ever reach a caller of the content generators: they are
/// raised by parsing and validation and then absorbed into a fallback value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed structured output: {0}")]
    MalformedStructuredOutput(String),

    #[error("Shape invariant violation: {0}")]
    ShapeInvariantViolation(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl DomainError {
    pub fn shape(message: impl Into<String>) -> Self {
        DomainError::ShapeInvariantViolation(message.into())
    }

    /// Check if this error came from use-case validation rather than parsing
    pub fn is_shape_violation(&self) -> bool {
        matches!(self, DomainError::ShapeInvariantViolation(_))
    }
}
