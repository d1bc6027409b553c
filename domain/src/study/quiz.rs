//! Multiple-choice quiz documents.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Number of questions every quiz carries
pub const QUIZ_LENGTH: usize = 10;

/// Number of distinct options every question carries
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A quiz of exactly [`QUIZ_LENGTH`] questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl QuizQuestion {
    fn new(id: u32, question: String, options: [&str; 4], answer: &str) -> Self {
        Self {
            id,
            question,
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    /// Check the per-question invariant: non-empty text, four unique
    /// options, answer drawn from the options.
    ///
    /// A single-letter answer (`"B"`) is resolved to the matching option
    /// before checking membership.
    pub fn validated(mut self) -> Result<Self, DomainError> {
        if self.question.trim().is_empty() {
            return Err(DomainError::shape(format!("question {} has no text", self.id)));
        }

        self.options = self.options.iter().map(|o| o.trim().to_string()).collect();
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(DomainError::shape(format!(
                "question {} has {} options, expected {}",
                self.id,
                self.options.len(),
                OPTIONS_PER_QUESTION
            )));
        }

        let unique: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        if unique.len() != OPTIONS_PER_QUESTION || unique.contains("") {
            return Err(DomainError::shape(format!(
                "question {} has duplicate or empty options",
                self.id
            )));
        }

        let answer = self.answer.trim().to_string();
        self.answer = match self.options.iter().find(|o| **o == answer) {
            Some(option) => option.clone(),
            None => self
                .option_for_letter(&answer)
                .ok_or_else(|| {
                    DomainError::shape(format!(
                        "question {} answer '{}' is not one of its options",
                        self.id, answer
                    ))
                })?
                .clone(),
        };

        Ok(self)
    }

    fn option_for_letter(&self, answer: &str) -> Option<&String> {
        let mut chars = answer.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() || !('A'..='D').contains(&letter) {
            return None;
        }
        self.options.get((letter as u8 - b'A') as usize)
    }
}

impl QuizDocument {
    /// Enforce the quiz shape.
    ///
    /// Fewer than [`QUIZ_LENGTH`] questions is a violation; extra questions
    /// are dropped. Missing ids are assigned from position.
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.questions.len() < QUIZ_LENGTH {
            return Err(DomainError::shape(format!(
                "quiz has {} questions, expected {}",
                self.questions.len(),
                QUIZ_LENGTH
            )));
        }

        let questions = self
            .questions
            .into_iter()
            .take(QUIZ_LENGTH)
            .enumerate()
            .map(|(index, mut question)| {
                if question.id == 0 {
                    question.id = index as u32 + 1;
                }
                question.validated()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            topic: self.topic,
            questions,
        })
    }

    /// Offline ten-question template with `topic` substituted.
    pub fn fallback(topic: &str) -> Self {
        let process = format!("A process related to {topic}").trim().to_string();
        let questions = vec![
            QuizQuestion::new(
                1,
                format!("What is {topic}?"),
                [process.as_str(), "An unrelated concept", "A type of food", "A programming language"],
                &process,
            ),
            QuizQuestion::new(
                2,
                format!("Which field is {topic} most associated with?"),
                ["Science", "Art", "Sports", "Music"],
                "Science",
            ),
            QuizQuestion::new(
                3,
                format!("What is a key component of {topic}?"),
                ["Energy", "Water", "Soil", "All of the above"],
                "All of the above",
            ),
            QuizQuestion::new(
                4,
                format!("Where does {topic} primarily occur?"),
                ["In plants", "In animals", "In machines", "In space"],
                "In plants",
            ),
            QuizQuestion::new(
                5,
                format!("What is the main purpose of {topic}?"),
                ["To produce energy", "To consume energy", "To store energy", "To transfer energy"],
                "To produce energy",
            ),
            QuizQuestion::new(
                6,
                format!("Which of these is required for {topic}?"),
                ["Sunlight", "Darkness", "Cold temperature", "High pressure"],
                "Sunlight",
            ),
            QuizQuestion::new(
                7,
                format!("What is a product of {topic}?"),
                ["Oxygen", "Carbon dioxide", "Nitrogen", "Hydrogen"],
                "Oxygen",
            ),
            QuizQuestion::new(
                8,
                format!("In which organelle does {topic} occur?"),
                ["Chloroplast", "Mitochondria", "Nucleus", "Ribosome"],
                "Chloroplast",
            ),
            QuizQuestion::new(
                9,
                format!("What color pigment is essential for {topic}?"),
                ["Green (Chlorophyll)", "Red", "Blue", "Yellow"],
                "Green (Chlorophyll)",
            ),
            QuizQuestion::new(
                10,
                format!("What is the chemical equation for {topic}?"),
                [
                    "6CO2 + 6H2O → C6H12O6 + 6O2",
                    "C6H12O6 + 6O2 → 6CO2 + 6H2O",
                    "2H2 + O2 → 2H2O",
                    "N2 + 3H2 → 2NH3",
                ],
                "6CO2 + 6H2O → C6H12O6 + 6O2",
            ),
        ];

        Self {
            topic: Some(topic.to_string()),
            questions,
        }
    }
}

/// Accept ids written as numbers or numeric strings; anything else is 0
/// and gets replaced by the question's position.
fn lenient_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
