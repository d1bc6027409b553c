//! Directed graph built from a [`ConceptGraph`] for layout.
//!
//! Nodes live in an arena (`Vec`) indexed by [`NodeId`], in first-seen
//! order: the root, then each edge's source and target. Edges touching a
//! non-concrete node are dropped before the graph is built.

use crate::study::concept_map::ConceptGraph;
use std::collections::{HashMap, VecDeque};

/// Index of a node in a [`LayoutGraph`]
pub type NodeId = usize;

/// Keywords marking abstract nodes that add nothing to a diagram
pub const NON_CONCRETE_KEYWORDS: &[&str] = &[
    "power",
    "jurisdiction",
    "role",
    "composition",
    "history",
    "summary",
    "function",
    "overview",
];

/// Node name used when a graph has neither edges nor a root
pub const DEFAULT_ROOT: &str = "System";

/// Whether `name` contains a non-concrete keyword (case-insensitive)
pub fn is_non_concrete(name: &str) -> bool {
    let lower = name.to_lowercase();
    NON_CONCRETE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    successors: Vec<Vec<NodeId>>,
    in_degree: Vec<usize>,
    edges: Vec<(NodeId, NodeId)>,
}

impl LayoutGraph {
    /// Build the filtered graph. Never empty: if filtering removes
    /// everything, the declared root (or [`DEFAULT_ROOT`]) is kept alone.
    pub fn from_concept_graph(graph: &ConceptGraph) -> Self {
        let mut layout = Self::default();
        let root = graph.root.trim();

        if !root.is_empty() && !is_non_concrete(root) {
            layout.add_node(root);
        }

        for edge in &graph.edges {
            let source = edge.source.trim();
            let target = edge.target.trim();
            if source.is_empty() || target.is_empty() {
                continue;
            }
            if is_non_concrete(source) || is_non_concrete(target) {
                continue;
            }
            layout.add_edge(source, target);
        }

        if layout.is_empty() {
            layout.add_node(if root.is_empty() { DEFAULT_ROOT } else { root });
        }
        layout
    }

    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.successors.push(Vec::new());
        self.in_degree.push(0);
        id
    }

    /// Add a directed edge. Parallel edges collapse into one.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let s = self.add_node(source);
        let t = self.add_node(target);
        if self.successors[s].contains(&t) {
            return;
        }
        self.successors[s].push(t);
        self.in_degree[t] += 1;
        self.edges.push((s, t));
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.names.len()
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id]
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Declared root if present, else the first node without incoming
    /// edges, else the first node.
    ///
    /// Must not be called on an empty graph.
    pub fn resolve_root(&self, declared: &str) -> NodeId {
        self.node_id(declared.trim())
            .or_else(|| self.node_ids().find(|&id| self.in_degree[id] == 0))
            .unwrap_or(0)
    }

    /// Breadth-first spanning tree from `root`, following edge direction.
    ///
    /// The first visit of a node wins, so back-edges and cycles are ignored.
    /// Returns each node's tree children and its depth (`None` when
    /// unreachable from `root`).
    pub fn bfs_tree(&self, root: NodeId) -> BfsTree {
        let mut children = vec![Vec::new(); self.len()];
        let mut depth = vec![None; self.len()];
        let mut queue = VecDeque::new();

        depth[root] = Some(0);
        queue.push_back(root);

        while let Some(node) = queue.pop_front() {
            let next_depth = depth[node].map(|d: usize| d + 1);
            for &child in &self.successors[node] {
                if depth[child].is_none() {
                    depth[child] = next_depth;
                    children[node].push(child);
                    queue.push_back(child);
                }
            }
        }

        BfsTree { children, depth }
    }
}

/// Result of [`LayoutGraph::bfs_tree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsTree {
    pub children: Vec<Vec<NodeId>>,
    pub depth: Vec<Option<usize>>,
}
