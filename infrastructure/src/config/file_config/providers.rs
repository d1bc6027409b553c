//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use studybuddy_domain::{
    GeminiProviderConfig, HuggingFaceProviderConfig, PollinationsProviderConfig, RankingPolicy,
};

/// Primary tier (`[providers.gemini]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    /// Preference substrings, most preferred first.
    pub preferred_models: Vec<String>,
    /// Model used when the catalog is unavailable.
    pub fallback_model: String,
    pub family_marker: String,
    /// Models containing this are skipped (no JSON mode).
    pub excluded_family: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        let domain = GeminiProviderConfig::default();
        Self {
            api_key_env: domain.api_key_env,
            api_key: domain.api_key,
            base_url: domain.base_url,
            preferred_models: domain.ranking.preferred,
            fallback_model: domain.ranking.fallback_model,
            family_marker: domain.ranking.family_marker,
            excluded_family: domain.ranking.excluded_family,
        }
    }
}

impl FileGeminiConfig {
    pub fn to_domain(&self) -> GeminiProviderConfig {
        GeminiProviderConfig {
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            ranking: RankingPolicy {
                preferred: self.preferred_models.clone(),
                family_marker: self.family_marker.clone(),
                excluded_family: self.excluded_family.clone(),
                fallback_model: self.fallback_model.clone(),
            },
        }
    }
}

/// Secondary tier (`[providers.huggingface]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHuggingFaceConfig {
    /// Environment variable name for the token (default: "HUGGINGFACE_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    /// Inference endpoint URL.
    pub endpoint: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
}

impl Default for FileHuggingFaceConfig {
    fn default() -> Self {
        let domain = HuggingFaceProviderConfig::default();
        Self {
            api_key_env: domain.api_key_env,
            api_key: domain.api_key,
            endpoint: domain.endpoint,
            max_new_tokens: domain.max_new_tokens,
            temperature: domain.temperature,
        }
    }
}

impl FileHuggingFaceConfig {
    pub fn to_domain(&self) -> HuggingFaceProviderConfig {
        HuggingFaceProviderConfig {
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
        }
    }
}

/// Tertiary tier (`[providers.pollinations]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollinationsConfig {
    pub endpoint: String,
    /// Request timeout (default: 30).
    pub timeout_secs: u64,
}

impl Default for FilePollinationsConfig {
    fn default() -> Self {
        let domain = PollinationsProviderConfig::default();
        Self {
            endpoint: domain.endpoint,
            timeout_secs: domain.timeout_secs,
        }
    }
}

impl FilePollinationsConfig {
    pub fn to_domain(&self) -> PollinationsProviderConfig {
        PollinationsProviderConfig {
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub gemini: FileGeminiConfig,
    pub huggingface: FileHuggingFaceConfig,
    pub pollinations: FilePollinationsConfig,
}
