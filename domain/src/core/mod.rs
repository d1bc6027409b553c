//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: parsing, validation, and layout errors
//! - [`text`]: character-safe truncation and word wrapping

pub mod error;
pub mod text;
