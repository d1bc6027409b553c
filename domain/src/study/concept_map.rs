//! Concept-map structures, canned demo hierarchies, and the diagnostic
//! fallback graph.

use crate::core::error::DomainError;
use crate::core::text::take_chars;
use serde::{Deserialize, Serialize};

/// Characters of the failure message shown inside the diagnostic graph
const DIAGNOSTIC_ERROR_CHARS: usize = 30;

/// Positioning strategy requested by whoever produced the graph.
///
/// Taken as given; it is not checked against the actual topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Tree,
    Cycle,
    Star,
    #[serde(other)]
    Other,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Tree => "tree",
            LayoutKind::Cycle => "cycle",
            LayoutKind::Star => "star",
            LayoutKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub relationship: String,
}

impl ConceptEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
        }
    }
}

/// Root plus edge list. Nodes are implicit: the root and every edge endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptGraph {
    #[serde(default)]
    pub layout: LayoutKind,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub edges: Vec<ConceptEdge>,
}

impl ConceptGraph {
    pub fn new(layout: LayoutKind, root: impl Into<String>, edges: Vec<ConceptEdge>) -> Self {
        Self {
            layout,
            root: root.into(),
            edges,
        }
    }

    /// Acceptance rule for model-produced graphs: a root and at least one edge.
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.root.trim().is_empty() {
            return Err(DomainError::shape("concept map has no root"));
        }
        if self.edges.is_empty() {
            return Err(DomainError::shape("concept map has no edges"));
        }
        Ok(self)
    }

    /// Three-node graph explaining why generation failed.
    pub fn diagnostic(topic: &str, last_error: &str) -> Self {
        let error_node = format!(
            "AI Error: {}...",
            take_chars(last_error, DIAGNOSTIC_ERROR_CHARS)
        );
        Self {
            layout: LayoutKind::Tree,
            root: topic.to_string(),
            edges: vec![
                ConceptEdge::new(topic, error_node.as_str(), "STATUS: FAILED"),
                ConceptEdge::new(error_node.as_str(), "Check API Key", "action"),
                ConceptEdge::new(error_node.as_str(), "Try Later", "action"),
            ],
        }
    }
}

/// A hardcoded hierarchy served without any provider call.
struct CannedHierarchy {
    keywords: &'static [&'static str],
    layout: LayoutKind,
    root: &'static str,
    edges: &'static [(&'static str, &'static str, &'static str)],
}

impl CannedHierarchy {
    fn matches(&self, normalized_topic: &str) -> bool {
        self.keywords.iter().any(|kw| normalized_topic.contains(kw))
    }

    fn to_graph(&self) -> ConceptGraph {
        ConceptGraph {
            layout: self.layout,
            root: self.root.to_string(),
            edges: self
                .edges
                .iter()
                .map(|(source, target, relationship)| ConceptEdge::new(*source, *target, *relationship))
                .collect(),
        }
    }
}

const JUDICIARY: CannedHierarchy = CannedHierarchy {
    keywords: &["judiciary", "court"],
    layout: LayoutKind::Tree,
    root: "Supreme Court",
    edges: &[
        ("Supreme Court", "High Courts", "Hierarchy"),
        ("High Courts", "Subordinate Courts", "Hierarchy"),
        // Civil
        ("Subordinate Courts", "Civil Courts", "Type"),
        ("Civil Courts", "District Judge", "Hierarchy"),
        ("District Judge", "Sub-Judge (Family)", "Hierarchy"),
        ("Sub-Judge (Family)", "Munsif Court", "Hierarchy"),
        ("Munsif Court", "Small Clause Court", "Hierarchy"),
        // Criminal
        ("Subordinate Courts", "Criminal Courts", "Type"),
        ("Criminal Courts", "Session Court", "Hierarchy"),
        ("Session Court", "Metropolitan/Judicial Magistrate", "Hierarchy"),
        ("Metropolitan/Judicial Magistrate", "Judicial Magistrate (Class II)", "Hierarchy"),
        ("Judicial Magistrate (Class II)", "Executive Magistrates", "Hierarchy"),
        // Revenue
        ("Subordinate Courts", "Revenue Courts", "Type"),
        ("Revenue Courts", "Board of Revenue", "Hierarchy"),
        ("Board of Revenue", "Commissioner Collector", "Hierarchy"),
        ("Commissioner Collector", "Tehsildar", "Hierarchy"),
        ("Tehsildar", "Asst. Tehsildar", "Hierarchy"),
    ],
};

const CANNED_HIERARCHIES: &[CannedHierarchy] = &[JUDICIARY];

/// Look up a canned hierarchy for `topic` (case-insensitive substring match).
pub fn canned_hierarchy(topic: &str) -> Option<ConceptGraph> {
    let normalized = topic.trim().to_lowercase();
    CANNED_HIERARCHIES
        .iter()
        .find(|canned| canned.matches(&normalized))
        .map(CannedHierarchy::to_graph)
}
