//! Output formatter trait

use std::path::PathBuf;
use studybuddy_application::RenderedMap;
use studybuddy_domain::{FlashcardDeck, ModelDescriptor, QuizDocument};

/// Result of one CLI command, ready to be formatted
#[derive(Debug, Clone)]
pub enum StudyOutput {
    Reply { message: String, reply: String },
    Summary { topic: String, summary: String },
    Quiz { topic: String, quiz: QuizDocument },
    Flashcards { topic: String, deck: FlashcardDeck },
    Map { topic: String, path: PathBuf, map: RenderedMap },
    /// `note` explains why the fallback model is listed instead of the catalog
    Models { models: Vec<ModelDescriptor>, note: Option<String> },
}

/// Trait for formatting study results
pub trait OutputFormatter {
    /// Human-readable text
    fn format(&self, output: &StudyOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &StudyOutput) -> String;
}
