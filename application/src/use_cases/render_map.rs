//! Render Map use case
//!
//! Composes concept-map generation with a [`MapRenderer`].

use crate::ports::map_renderer::{MapRenderer, RenderedImage};
use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::concept_map::GenerateConceptMapUseCase;
use crate::use_cases::generate_text::GenerationOrchestrator;
use std::sync::Arc;
use studybuddy_domain::ConceptGraph;
use tracing::debug;

/// Graph plus the image drawn from it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub graph: ConceptGraph,
    pub image: RenderedImage,
}

pub struct RenderMapUseCase {
    concept_map: GenerateConceptMapUseCase,
    renderer: Arc<dyn MapRenderer>,
}

impl RenderMapUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, renderer: Arc<dyn MapRenderer>) -> Self {
        Self {
            concept_map: GenerateConceptMapUseCase::new(orchestrator),
            renderer,
        }
    }

    pub async fn execute(&self, topic: &str) -> RenderedMap {
        self.execute_with_progress(topic, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn GenerationProgress,
    ) -> RenderedMap {
        let graph = self.concept_map.execute_with_progress(topic, progress).await;
        let image = self.renderer.render(&graph);
        debug!(
            "Rendered map for '{}': {} bytes of {}",
            topic,
            image.bytes.len(),
            image.mime_type
        );
        RenderedMap { graph, image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::generate_text::tests::FixedTextGateway;
    use std::sync::Mutex;

    /// Records the graphs it was asked to draw
    struct RecordingRenderer {
        seen: Mutex<Vec<ConceptGraph>>,
    }

    impl MapRenderer for RecordingRenderer {
        fn render(&self, graph: &ConceptGraph) -> RenderedImage {
            self.seen.lock().unwrap().push(graph.clone());
            RenderedImage::new("image/svg+xml", graph.root.clone().into_bytes())
        }
    }

    #[tokio::test]
    async fn test_renders_generated_graph() {
        let renderer = Arc::new(RecordingRenderer {
            seen: Mutex::new(Vec::new()),
        });
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "{}"));
        let use_case = RenderMapUseCase::new(
            Arc::new(GenerationOrchestrator::new(tertiary.clone())),
            renderer.clone(),
        );

        let map = use_case.execute("High Court").await;
        assert_eq!(map.graph.root, "Supreme Court");
        assert_eq!(map.image.bytes, b"Supreme Court".to_vec());
        assert_eq!(renderer.seen.lock().unwrap().len(), 1);
        assert_eq!(tertiary.call_count(), 0);
    }
}
