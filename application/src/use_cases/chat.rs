//! Chat Reply use case

use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::generate_text::GenerationOrchestrator;
use std::sync::Arc;
use studybuddy_domain::study::replies::chat_apology;
use studybuddy_domain::{GenerationRequest, StudyPromptTemplate};
use tracing::warn;

/// Answers a free-form chat message. Never fails: exhaustion becomes an
/// apology that echoes the start of the message.
pub struct ChatReplyUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
}

impl ChatReplyUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, message: &str) -> String {
        self.execute_with_progress(message, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        message: &str,
        progress: &dyn GenerationProgress,
    ) -> String {
        let request = GenerationRequest::text(StudyPromptTemplate::chat(message));
        match self.orchestrator.generate_with_progress(&request, progress).await {
            Ok(generated) => generated.text,
            Err(e) => {
                warn!("Chat reply fell back to apology: {}", e);
                chat_apology(message, &e.to_string(), e.is_quota_exceeded())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::ProviderError;
    use crate::use_cases::generate_text::tests::FixedTextGateway;

    #[tokio::test]
    async fn test_reply_passes_through_provider_text() {
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "Osmosis is..."));
        let use_case = ChatReplyUseCase::new(Arc::new(GenerationOrchestrator::new(tertiary.clone())));

        assert_eq!(use_case.execute("What is osmosis?").await, "Osmosis is...");
        let sent = tertiary.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(sent.prompt, "What is osmosis?");
        assert!(!sent.structured_output);
    }

    #[tokio::test]
    async fn test_quota_failure_gives_busy_apology() {
        let tertiary = Arc::new(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "HTTP 429"),
        ));
        let use_case = ChatReplyUseCase::new(Arc::new(GenerationOrchestrator::new(tertiary)));

        let reply = use_case.execute("Tell me about mitochondria").await;
        assert!(reply.starts_with("⚠️ All AI models are currently busy"));
        assert!(reply.contains("Tell me about mitochondria..."));
    }

    #[tokio::test]
    async fn test_other_failure_reports_details() {
        let tertiary = Arc::new(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "connection refused"),
        ));
        let use_case = ChatReplyUseCase::new(Arc::new(GenerationOrchestrator::new(tertiary)));

        let reply = use_case.execute("hi").await;
        assert!(reply.contains("connection refused"));
        assert!(!reply.contains("busy"));
    }
}
