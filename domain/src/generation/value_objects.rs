//! Generation value objects

/// A single prompt sent through the provider cascade.
///
/// Ephemeral: built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Ask the provider to constrain its output to JSON when it can.
    pub structured_output: bool,
}

impl GenerationRequest {
    /// Free-text request (chat, summary)
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            structured_output: false,
        }
    }

    /// Request whose answer must parse as JSON (quiz, flashcards, concept map)
    pub fn structured(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            structured_output: true,
        }
    }
}

/// Uniform result of any provider adapter.
///
/// Every adapter constructs this explicitly; the raw payload is kept only
/// for diagnostics and is dropped together with the value.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedText {
    pub text: String,
    /// Name of the provider that produced the text
    pub provider: String,
    /// Provider-specific response body, as received
    pub raw_payload: serde_json::Value,
}

impl GeneratedText {
    pub fn new(text: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
            raw_payload: serde_json::Value::Null,
        }
    }

    pub fn with_raw_payload(mut self, payload: serde_json::Value) -> Self {
        self.raw_payload = payload;
        self
    }

    /// True when the provider answered but produced no usable text
    /// (e.g. the response was blocked by a safety filter).
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
