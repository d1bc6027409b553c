//! Provider adapters
//!
//! One adapter per upstream service, each implementing an application
//! gateway port:
//!
//! | Adapter | Port | Tier |
//! |---------|------|------|
//! | [`GeminiGateway`] | `ModelGateway` | primary |
//! | [`HuggingFaceGateway`] | `TextGateway` | secondary |
//! | [`PollinationsGateway`] | `TextGateway` | tertiary |
//!
//! [`build_orchestrator`] wires them into the cascade according to the
//! configuration and the resolved credentials.

mod gemini;
mod huggingface;
mod pollinations;

pub use gemini::GeminiGateway;
pub use huggingface::HuggingFaceGateway;
pub use pollinations::PollinationsGateway;

use crate::config::Credentials;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use studybuddy_application::{GenerationOrchestrator, ProviderError, RetryPolicy};
use studybuddy_domain::ProviderConfig;
use studybuddy_domain::core::text::take_chars;
use tracing::{debug, info};

/// Characters of an error body kept in provider error messages
const ERROR_BODY_CHARS: usize = 200;

/// Map a non-success HTTP status to a provider error.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    let message = format!(
        "HTTP {}: {}",
        status.as_u16(),
        take_chars(body.trim(), ERROR_BODY_CHARS)
    );
    if status == StatusCode::TOO_MANY_REQUESTS {
        ProviderError::rate_limited(provider, message)
    } else {
        ProviderError::unavailable(provider, message)
    }
}

/// Map a transport-level failure (connect, timeout, body read).
pub(crate) fn transport_error(provider: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::unavailable(provider, format!("request timed out: {}", error))
    } else {
        ProviderError::unavailable(provider, error.to_string())
    }
}

/// Build the generation cascade.
///
/// Tiers without a credential are disabled; the orchestrator reports them
/// in its error log without making a call.
pub fn build_orchestrator(
    config: &ProviderConfig,
    credentials: &Credentials,
) -> Result<GenerationOrchestrator, reqwest::Error> {
    let client = reqwest::Client::builder().build()?;

    let mut tertiary_client = reqwest::Client::builder();
    if config.pollinations.timeout_secs > 0 {
        tertiary_client =
            tertiary_client.timeout(Duration::from_secs(config.pollinations.timeout_secs));
    }
    let tertiary = PollinationsGateway::new(tertiary_client.build()?, &config.pollinations);

    let mut orchestrator = GenerationOrchestrator::new(Arc::new(tertiary))
        .with_retry_policy(RetryPolicy::from(&config.generation));

    orchestrator = match &credentials.gemini {
        Some(key) => {
            info!("Primary tier enabled ({})", gemini::PROVIDER);
            orchestrator.with_primary(
                Arc::new(GeminiGateway::new(
                    client.clone(),
                    &config.gemini,
                    key.clone(),
                )),
                config.gemini.ranking.clone(),
            )
        }
        None => {
            debug!(
                "{} not set, primary tier disabled",
                config.gemini.api_key_env
            );
            orchestrator.without_primary(ProviderError::auth_missing(
                gemini::PROVIDER,
                format!("{} is not set", config.gemini.api_key_env),
            ))
        }
    };

    orchestrator = match &credentials.huggingface {
        Some(key) => {
            info!("Secondary tier enabled ({})", huggingface::PROVIDER);
            orchestrator.with_secondary(Arc::new(HuggingFaceGateway::new(
                client,
                &config.huggingface,
                key.clone(),
            )))
        }
        None => {
            debug!(
                "{} not set, secondary tier disabled",
                config.huggingface.api_key_env
            );
            orchestrator.without_secondary(ProviderError::auth_missing(
                huggingface::PROVIDER,
                format!("{} is not set", config.huggingface.api_key_env),
            ))
        }
    };

    Ok(orchestrator)
}
