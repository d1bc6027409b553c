//! Progress notification port
//!
//! Defines the interface for reporting progress while the provider
//! cascade runs.

use crate::ports::llm_gateway::ProviderError;
use std::time::Duration;

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, log lines, etc.)
pub trait GenerationProgress: Send + Sync {
    /// Called when a tier starts
    fn on_tier_start(&self, _provider: &str) {}

    /// Called before each call to a primary-tier model (attempt starts at 1)
    fn on_model_attempt(&self, _model: &str, _attempt: u32) {}

    /// Called before sleeping for a same-model retry
    fn on_rate_limited(&self, _model: &str, _delay: Duration) {}

    /// Called when a tier gives up
    fn on_tier_failed(&self, _provider: &str, _error: &ProviderError) {}

    /// Called once a provider produced the answer
    fn on_complete(&self, _provider: &str) {}

    /// Called when every tier failed
    fn on_exhausted(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {}
