//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, env, etc.). The infrastructure layer
//! maps its file schema onto them.

use crate::generation::model_ranking::RankingPolicy;

/// Settings for all three provider tiers plus the retry policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub gemini: GeminiProviderConfig,
    pub huggingface: HuggingFaceProviderConfig,
    pub pollinations: PollinationsProviderConfig,
    pub generation: GenerationPolicy,
}

/// Primary tier: model catalog plus per-model generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiProviderConfig {
    /// Environment variable holding the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    /// Catalog filtering and preference order.
    pub ranking: RankingPolicy,
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            ranking: RankingPolicy::default(),
        }
    }
}

/// Secondary tier: hosted instruction model.
#[derive(Debug, Clone, PartialEq)]
pub struct HuggingFaceProviderConfig {
    /// Environment variable holding the token (default: "HUGGINGFACE_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub endpoint: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
}

impl Default for HuggingFaceProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "HUGGINGFACE_API_KEY".to_string(),
            api_key: None,
            endpoint:
                "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.3"
                    .to_string(),
            max_new_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Tertiary tier: free endpoint, no credential.
#[derive(Debug, Clone, PartialEq)]
pub struct PollinationsProviderConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for PollinationsProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://text.pollinations.ai/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Retry behavior of the primary tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// Attempts per candidate model, counting the first (default: 2).
    pub attempts_per_model: u32,
    /// Pause before retrying a rate-limited model, in milliseconds.
    pub rate_limit_delay_ms: u64,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            attempts_per_model: 2,
            rate_limit_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_public_endpoints() {
        let config = ProviderConfig::default();
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.gemini.ranking.fallback_model, "models/gemini-1.5-flash");
        assert!(config.huggingface.endpoint.ends_with("Mistral-7B-Instruct-v0.3"));
        assert_eq!(config.huggingface.max_new_tokens, 1000);
        assert_eq!(config.pollinations.timeout_secs, 30);
        assert_eq!(config.generation.attempts_per_model, 2);
        assert_eq!(config.generation.rate_limit_delay_ms, 1000);
    }
}
