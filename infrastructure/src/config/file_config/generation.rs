//! Cascade retry settings (`[generation]` section)

use serde::{Deserialize, Serialize};
use studybuddy_domain::GenerationPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Attempts per primary model, counting the first (default: 2)
    pub attempts_per_model: u32,
    /// Wait before retrying a rate-limited model (default: 1000)
    pub rate_limit_delay_ms: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let policy = GenerationPolicy::default();
        Self {
            attempts_per_model: policy.attempts_per_model,
            rate_limit_delay_ms: policy.rate_limit_delay_ms,
        }
    }
}

impl FileGenerationConfig {
    pub fn to_domain(&self) -> GenerationPolicy {
        GenerationPolicy {
            attempts_per_model: self.attempts_per_model,
            rate_limit_delay_ms: self.rate_limit_delay_ms,
        }
    }
}
