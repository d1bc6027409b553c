//! Flashcard decks.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

/// Ordered, non-empty sequence of flashcards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDeck {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.front.trim().is_empty() && self.back.trim().is_empty()
    }
}

impl FlashcardDeck {
    /// Drop fully blank cards, then require at least one card.
    pub fn validated(self) -> Result<Self, DomainError> {
        let flashcards: Vec<Flashcard> = self
            .flashcards
            .into_iter()
            .filter(|card| !card.is_blank())
            .collect();

        if flashcards.is_empty() {
            return Err(DomainError::shape("flashcard deck is empty"));
        }
        Ok(Self { flashcards })
    }

    /// Offline five-card deck. The first card reports `last_error`.
    pub fn fallback(topic: &str, last_error: &str) -> Self {
        Self {
            flashcards: vec![
                Flashcard::new(format!("AI Error: {last_error}"), "Please check backend logs."),
                Flashcard::new(
                    format!("What is {topic}?"),
                    format!("A complex subject involving various elements of {topic}."),
                ),
                Flashcard::new(
                    "Key Concept 1",
                    format!("Definition of key concept 1 related to {topic}"),
                ),
                Flashcard::new(
                    "Important Date/Figure",
                    format!("Relevant historical context for {topic}"),
                ),
                Flashcard::new(
                    "Common Application",
                    format!("How {topic} is used in the real world."),
                ),
            ],
        }
    }
}
