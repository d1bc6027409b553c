//! Generate Concept Map use case

use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::generate_text::GenerationOrchestrator;
use crate::use_cases::shared::{ContentError, generate_structured};
use std::sync::Arc;
use studybuddy_domain::{ConceptGraph, StudyPromptTemplate, canned_hierarchy};
use tracing::{info, warn};

/// Produces the graph structure of a concept map.
///
/// Topics with a canned hierarchy are answered without any provider call.
pub struct GenerateConceptMapUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateConceptMapUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, topic: &str) -> ConceptGraph {
        self.execute_with_progress(topic, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> ConceptGraph {
        if let Some(canned) = canned_hierarchy(topic) {
            info!("Using canned hierarchy for '{}'", topic);
            return canned;
        }

        match self.try_generate(topic, progress).await {
            Ok(graph) => graph,
            Err(e) => {
                warn!("Concept map for '{}' fell back to diagnostic: {}", topic, e);
                ConceptGraph::diagnostic(topic, &e.to_string())
            }
        }
    }

    async fn try_generate(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> Result<ConceptGraph, ContentError> {
        let graph: ConceptGraph = generate_structured(
            &self.orchestrator,
            StudyPromptTemplate::concept_map(topic),
            progress,
        )
        .await?;
        Ok(graph.validated()?)
    }
}
