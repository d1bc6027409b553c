//! Infrastructure layer for study-buddy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod render;

// Re-export commonly used types
pub use config::{
    ApiKey, ConfigError, ConfigLoader, ConfigWarning, Credentials, FileConfig, FileOutputConfig,
};
pub use providers::{GeminiGateway, HuggingFaceGateway, PollinationsGateway, build_orchestrator};
pub use render::{SVG_MIME_TYPE, SvgMapRenderer};
