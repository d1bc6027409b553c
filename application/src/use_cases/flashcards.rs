//! Generate Flashcards use case

use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::generate_text::GenerationOrchestrator;
use crate::use_cases::shared::{ContentError, generate_structured};
use std::sync::Arc;
use studybuddy_domain::{FlashcardDeck, StudyPromptTemplate};
use tracing::warn;

/// Produces a non-empty flashcard deck
pub struct GenerateFlashcardsUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateFlashcardsUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, topic: &str) -> FlashcardDeck {
        self.execute_with_progress(topic, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> FlashcardDeck {
        match self.try_generate(topic, progress).await {
            Ok(deck) => deck,
            Err(e) => {
                warn!("Flashcards for '{}' fell back to template: {}", topic, e);
                FlashcardDeck::fallback(topic, &e.to_string())
            }
        }
    }

    async fn try_generate(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> Result<FlashcardDeck, ContentError> {
        let deck: FlashcardDeck = generate_structured(
            &self.orchestrator,
            StudyPromptTemplate::flashcards(topic),
            progress,
        )
        .await?;
        Ok(deck.validated()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::ProviderError;
    use crate::use_cases::generate_text::tests::FixedTextGateway;

    fn use_case(gateway: FixedTextGateway) -> GenerateFlashcardsUseCase {
        GenerateFlashcardsUseCase::new(Arc::new(GenerationOrchestrator::new(Arc::new(gateway))))
    }

    #[tokio::test]
    async fn test_ai_deck_is_returned() {
        let deck = use_case(FixedTextGateway::ok(
            "pollinations",
            r#"Here you go: {"flashcards": [{"front": "ATP", "back": "Energy currency"}]}"#,
        ))
        .execute("Cells")
        .await;

        assert_eq!(deck.flashcards.len(), 1);
        assert_eq!(deck.flashcards[0].front, "ATP");
    }

    #[tokio::test]
    async fn test_empty_deck_falls_back_with_reason() {
        let deck = use_case(FixedTextGateway::ok("pollinations", r#"{"flashcards": []}"#))
            .execute("Cells")
            .await;

        assert_eq!(deck.flashcards.len(), 5);
        assert!(deck.flashcards[0].front.starts_with("AI Error: "));
        assert!(deck.flashcards[0].front.contains("empty"));
        assert_eq!(deck.flashcards[1].front, "What is Cells?");
    }

    #[tokio::test]
    async fn test_exhaustion_is_reported_on_first_card() {
        let deck = use_case(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "HTTP 502"),
        ))
        .execute("Cells")
        .await;

        assert!(deck.flashcards[0].front.contains("All AI Providers Failed"));
        assert!(deck.flashcards[0].front.contains("HTTP 502"));
        assert_eq!(deck.flashcards[0].back, "Please check backend logs.");
    }
}
