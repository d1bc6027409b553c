//! Prompt domain
//!
//! Templates for the prompts each content generator sends to the cascade.

mod template;

pub use template::StudyPromptTemplate;
