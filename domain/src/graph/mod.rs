//! Concept-map rendering pipeline (everything except image encoding).
//!
//! [`ConceptGraph`](crate::study::concept_map::ConceptGraph) →
//! [`layout_graph::LayoutGraph`] → [`layout::compute_layout`] →
//! [`scene::MapScene`].

pub mod layout;
pub mod layout_graph;
pub mod scene;
