//! Generate Quiz use case

use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::generate_text::GenerationOrchestrator;
use crate::use_cases::shared::{ContentError, generate_structured};
use std::sync::Arc;
use studybuddy_domain::{QuizDocument, StudyPromptTemplate};
use tracing::{info, warn};

/// Produces a ten-question multiple-choice quiz.
///
/// AI output that violates the quiz shape (too few questions, duplicate
/// options, answer not among the options) is replaced by the template quiz.
pub struct GenerateQuizUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateQuizUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, topic: &str) -> QuizDocument {
        self.execute_with_progress(topic, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> QuizDocument {
        match self.try_generate(topic, progress).await {
            Ok(quiz) => quiz,
            Err(e) => {
                warn!("Quiz for '{}' fell back to template: {}", topic, e);
                QuizDocument::fallback(topic)
            }
        }
    }

    async fn try_generate(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> Result<QuizDocument, ContentError> {
        let quiz: QuizDocument =
            generate_structured(&self.orchestrator, StudyPromptTemplate::quiz(topic), progress)
                .await?;
        let quiz = quiz.validated()?;
        info!("Generated quiz for '{}'", topic);
        Ok(quiz)
    }
}
