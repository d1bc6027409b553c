//! Provider credentials, resolved once at startup.

use std::fmt;
use studybuddy_domain::ProviderConfig;

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Immutable credential set. `None` disables the corresponding tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub gemini: Option<ApiKey>,
    pub huggingface: Option<ApiKey>,
}

impl Credentials {
    /// Resolve from the process environment.
    pub fn from_env(config: &ProviderConfig) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolve with a custom variable lookup.
    ///
    /// A key written in the config file wins over the environment. Blank
    /// values count as absent.
    pub fn resolve(config: &ProviderConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |direct: &Option<String>, env_name: &str| {
            direct
                .clone()
                .or_else(|| lookup(env_name))
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
                .map(ApiKey)
        };

        Self {
            gemini: pick(&config.gemini.api_key, &config.gemini.api_key_env),
            huggingface: pick(&config.huggingface.api_key, &config.huggingface.api_key_env),
        }
    }
}
