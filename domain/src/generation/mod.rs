//! Text generation concepts shared by the provider cascade.
//!
//! - [`value_objects`]: request/result values exchanged with adapters
//! - [`model_ranking`]: catalog filtering and preference ordering
//! - [`normalize`]: fence stripping and tolerant JSON parsing

pub mod model_ranking;
pub mod normalize;
pub mod value_objects;

/// Substring that marks a rate-limit (quota) failure in provider error text
pub const RATE_LIMIT_MARKER: &str = "429";
