//! LLM Gateway ports
//!
//! Defines the interfaces for talking to text-generation providers.
//! The primary provider exposes a model catalog ([`ModelGateway`]); the
//! fallback providers take a prompt and nothing else ([`TextGateway`]).

use async_trait::async_trait;
use studybuddy_domain::{CatalogModel, GeneratedText, GenerationRequest, RATE_LIMIT_MARKER};
use thiserror::Error;

/// Failure of a single provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{provider} rate limited: {message}")]
    RateLimited { provider: String, message: String },

    #[error("{provider} unavailable: {message}")]
    Unavailable { provider: String, message: String },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("{provider} disabled: {message}")]
    AuthMissing { provider: String, message: String },
}

impl ProviderError {
    pub fn rate_limited(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn auth_missing(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuthMissing {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::RateLimited { provider, .. }
            | Self::Unavailable { provider, .. }
            | Self::MalformedResponse { provider, .. }
            | Self::AuthMissing { provider, .. } => provider,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RateLimited { message, .. }
            | Self::Unavailable { message, .. }
            | Self::MalformedResponse { message, .. }
            | Self::AuthMissing { message, .. } => message,
        }
    }

    /// Quota failures are retried on the same model.
    ///
    /// Besides the explicit variant, any error whose text carries the
    /// rate-limit marker counts: providers do not always use a status code.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. }) || self.message().contains(RATE_LIMIT_MARKER)
    }
}

/// Primary provider: lists its models and generates with a chosen one
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Provider name used in logs and error reports
    fn name(&self) -> &str;

    /// Fetch the model catalog
    async fn list_models(&self) -> Result<Vec<CatalogModel>, ProviderError>;

    /// Generate with a specific model
    async fn generate(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedText, ProviderError>;
}

/// Fallback provider with a fixed model
#[async_trait]
pub trait TextGateway: Send + Sync {
    /// Provider name used in logs and error reports
    fn name(&self) -> &str;

    /// Generate a single answer for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedText, ProviderError>;
}
