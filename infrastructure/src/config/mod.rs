//! Configuration file loading for study-buddy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `STUDYBUDDY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./studybuddy.toml` or `./.studybuddy.toml`
//! 4. Global: `$XDG_CONFIG_HOME/study-buddy/config.toml`
//! 5. Default values
//!
//! API keys are not merged here; [`Credentials`] reads them once from the
//! variables the config names.

mod credentials;
mod file_config;
mod loader;

pub use credentials::{ApiKey, Credentials};
pub use file_config::{
    ConfigWarning, FileConfig, FileGeminiConfig, FileGenerationConfig, FileHuggingFaceConfig,
    FileOutputConfig, FilePollinationsConfig, FileProvidersConfig,
};
pub use loader::{ConfigError, ConfigLoader};
