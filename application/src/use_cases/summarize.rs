//! Summarize use case

use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::generate_text::GenerationOrchestrator;
use std::sync::Arc;
use studybuddy_domain::study::replies::{shape_summary, summary_filtered, summary_unavailable};
use studybuddy_domain::{GenerationRequest, StudyPromptTemplate};
use tracing::warn;

/// Produces a single-paragraph topic summary of bounded length
pub struct SummarizeUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
}

impl SummarizeUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, topic: &str) -> String {
        self.execute_with_progress(topic, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> String {
        let request = GenerationRequest::text(StudyPromptTemplate::summary(topic));
        match self.orchestrator.generate_with_progress(&request, progress).await {
            Ok(generated) if generated.is_blank() => {
                warn!("{} returned an empty summary for '{}'", generated.provider, topic);
                summary_filtered(topic)
            }
            Ok(generated) => shape_summary(&generated.text),
            Err(e) => {
                warn!("Summary fell back to template: {}", e);
                summary_unavailable(topic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::ProviderError;
    use crate::use_cases::generate_text::tests::FixedTextGateway;

    fn use_case(gateway: FixedTextGateway) -> SummarizeUseCase {
        SummarizeUseCase::new(Arc::new(GenerationOrchestrator::new(Arc::new(gateway))))
    }

    #[tokio::test]
    async fn test_summary_is_single_bounded_paragraph() {
        let long = format!("First line.\n\n{}", "word ".repeat(400));
        let summary = use_case(FixedTextGateway::ok("pollinations", &long))
            .execute("Cells")
            .await;

        assert!(!summary.contains('\n'));
        assert_eq!(summary.split_whitespace().count(), 300);
        assert!(summary.starts_with("First line. word"));
    }

    #[tokio::test]
    async fn test_blank_answer_reports_filtering() {
        let summary = use_case(FixedTextGateway::ok("pollinations", "  \n"))
            .execute("Cells")
            .await;
        assert_eq!(summary, summary_filtered("Cells"));
    }

    #[tokio::test]
    async fn test_exhaustion_gives_template() {
        let summary = use_case(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "down"),
        ))
        .execute("Cells")
        .await;
        assert_eq!(summary, summary_unavailable("Cells"));
    }
}
