//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types with
//! [`FileConfig::provider_config`].

mod generation;
mod output;
mod providers;

pub use generation::FileGenerationConfig;
pub use output::FileOutputConfig;
pub use providers::{
    FileGeminiConfig, FileHuggingFaceConfig, FilePollinationsConfig, FileProvidersConfig,
};

use serde::{Deserialize, Serialize};
use studybuddy_domain::ProviderConfig;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Retry behavior of the primary tier
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

/// A setting that loads fine but will not behave as the user expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted key, e.g. `generation.attempts_per_model`
    pub field: String,
    pub message: String,
}

impl ConfigWarning {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Provider settings in domain form
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            gemini: self.providers.gemini.to_domain(),
            huggingface: self.providers.huggingface.to_domain(),
            pollinations: self.providers.pollinations.to_domain(),
            generation: self.generation.to_domain(),
        }
    }

    /// Validate the configuration, returning every suspicious setting.
    ///
    /// Nothing here is fatal: each warning names a value that is used
    /// as-is (or clamped) at runtime.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let gemini = &self.providers.gemini;

        if self.generation.attempts_per_model == 0 {
            warnings.push(ConfigWarning::new(
                "generation.attempts_per_model",
                "0 attempts is treated as 1",
            ));
        }
        if gemini.preferred_models.is_empty() {
            warnings.push(ConfigWarning::new(
                "providers.gemini.preferred_models",
                "empty preference list, catalog order will be used",
            ));
        }
        if gemini.fallback_model.trim().is_empty() {
            warnings.push(ConfigWarning::new(
                "providers.gemini.fallback_model",
                "empty fallback model, the primary tier fails when the catalog is unavailable",
            ));
        }
        if gemini.family_marker.trim().is_empty() {
            warnings.push(ConfigWarning::new(
                "providers.gemini.family_marker",
                "empty family marker accepts every catalog model",
            ));
        }
        if gemini.api_key.is_some() {
            warnings.push(ConfigWarning::new(
                "providers.gemini.api_key",
                format!("key stored in config file, prefer ${}", gemini.api_key_env),
            ));
        }
        if self.providers.huggingface.api_key.is_some() {
            warnings.push(ConfigWarning::new(
                "providers.huggingface.api_key",
                format!(
                    "key stored in config file, prefer ${}",
                    self.providers.huggingface.api_key_env
                ),
            ));
        }
        if !(0.0..=2.0).contains(&self.providers.huggingface.temperature) {
            warnings.push(ConfigWarning::new(
                "providers.huggingface.temperature",
                format!(
                    "{} is outside the usual 0.0-2.0 range",
                    self.providers.huggingface.temperature
                ),
            ));
        }
        if self.providers.pollinations.timeout_secs == 0 {
            warnings.push(ConfigWarning::new(
                "providers.pollinations.timeout_secs",
                "0 disables the only timeout in the cascade",
            ));
        }

        warnings
    }
}
