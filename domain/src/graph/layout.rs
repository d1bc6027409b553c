//! Node positioning.
//!
//! Positions are kept in an arena indexed by [`NodeId`]; a `None` slot is a
//! node the chosen algorithm did not place. Coordinates are abstract layout
//! units with `y` growing upwards; the scene maps them onto the canvas.

use super::layout_graph::{LayoutGraph, NodeId};
use crate::core::error::DomainError;
use crate::study::concept_map::LayoutKind;

/// Horizontal extent given to the whole tree
pub const TREE_WIDTH: f64 = 10.0;
/// Vertical distance between tree levels
pub const TREE_VERTICAL_GAP: f64 = 0.5;
/// Space between the main layout and a patched component
const PATCH_GAP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Per-node position slots
pub type Positions = Vec<Option<Point>>;

/// Positions plus what had to be repaired to get them
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub positions: Vec<Point>,
    /// Why the requested algorithm was abandoned for the force-directed one
    pub fallback_reason: Option<String>,
    /// Nodes placed by the disconnected-component patch
    pub patched_nodes: usize,
}

/// Place every node of `graph`.
///
/// Runs the algorithm requested by `kind`; any failure switches to the
/// force-directed layout. Nodes still unplaced afterwards (components not
/// reachable from `root`) get their own force-directed cluster beside the
/// main layout.
pub fn compute_layout(graph: &LayoutGraph, root: NodeId, kind: LayoutKind) -> LayoutOutcome {
    let all: Vec<NodeId> = graph.node_ids().collect();

    let attempt = match kind {
        LayoutKind::Tree => hierarchy(graph, root, TREE_WIDTH, TREE_VERTICAL_GAP),
        LayoutKind::Cycle => Ok(circular(graph.len(), &all, Point::ORIGIN, 1.0)),
        LayoutKind::Star => shell(graph, root),
        LayoutKind::Other => Ok(ForceLayout::default().place(graph, &all, Point::ORIGIN, 1.0)),
    }
    .and_then(check_finite);

    let (mut positions, fallback_reason) = match attempt {
        Ok(positions) => (positions, None),
        Err(error) => (
            ForceLayout::default().place(graph, &all, Point::ORIGIN, 1.0),
            Some(error.to_string()),
        ),
    };

    let patched_nodes = patch_unpositioned(graph, &mut positions);

    LayoutOutcome {
        positions: positions
            .into_iter()
            .map(|p| p.unwrap_or(Point::ORIGIN))
            .collect(),
        fallback_reason,
        patched_nodes,
    }
}

/// Top-down tree over the breadth-first spanning tree of `root`.
///
/// A node's horizontal slot is split evenly among its children; each level
/// sits `vertical_gap` below its parent.
pub fn hierarchy(
    graph: &LayoutGraph,
    root: NodeId,
    width: f64,
    vertical_gap: f64,
) -> Result<Positions, DomainError> {
    if root >= graph.len() {
        return Err(DomainError::Layout(format!(
            "root index {root} outside graph of {} nodes",
            graph.len()
        )));
    }
    let tree = graph.bfs_tree(root);
    let mut positions = vec![None; graph.len()];
    place_subtrees(&tree.children, root, width, vertical_gap, &mut positions);
    Ok(positions)
}

/// Explicit work stack of `(node, width, y, x_center)`; chains can be
/// arbitrarily deep.
fn place_subtrees(
    children: &[Vec<NodeId>],
    root: NodeId,
    width: f64,
    vertical_gap: f64,
    positions: &mut Positions,
) {
    let mut stack = vec![(root, width, 0.0, 0.5)];
    while let Some((node, width, y, x_center)) = stack.pop() {
        positions[node] = Some(Point::new(x_center, y));

        let kids = &children[node];
        if kids.is_empty() {
            continue;
        }
        let dx = width / kids.len() as f64;
        let mut next_x = x_center - width / 2.0 - dx / 2.0;
        for &child in kids {
            next_x += dx;
            stack.push((child, dx, y - vertical_gap, next_x));
        }
    }
}

/// `nodes` evenly spaced on a circle, starting at angle zero.
pub fn circular(len: usize, nodes: &[NodeId], center: Point, scale: f64) -> Positions {
    let mut positions = vec![None; len];
    if nodes.len() == 1 {
        positions[nodes[0]] = Some(center);
        return positions;
    }
    let step = std::f64::consts::TAU / nodes.len() as f64;
    for (i, &node) in nodes.iter().enumerate() {
        let theta = step * i as f64;
        positions[node] = Some(Point::new(
            center.x + scale * theta.cos(),
            center.y + scale * theta.sin(),
        ));
    }
    positions
}

/// Root at the center, every other node on one ring.
pub fn shell(graph: &LayoutGraph, root: NodeId) -> Result<Positions, DomainError> {
    if root >= graph.len() {
        return Err(DomainError::Layout(format!("root index {root} not in graph")));
    }
    let ring: Vec<NodeId> = graph.node_ids().filter(|&id| id != root).collect();
    let mut positions = if ring.is_empty() {
        vec![None; graph.len()]
    } else {
        circular(graph.len(), &ring, Point::ORIGIN, 1.0)
    };
    positions[root] = Some(Point::ORIGIN);
    Ok(positions)
}

fn check_finite(positions: Positions) -> Result<Positions, DomainError> {
    match positions.iter().flatten().find(|p| !p.is_finite()) {
        Some(p) => Err(DomainError::Layout(format!(
            "non-finite position ({}, {})",
            p.x, p.y
        ))),
        None => Ok(positions),
    }
}

/// Give every unplaced node a position in a separate force-directed
/// cluster to the right of the placed ones. Returns how many were patched.
fn patch_unpositioned(graph: &LayoutGraph, positions: &mut Positions) -> usize {
    let missing: Vec<NodeId> = graph
        .node_ids()
        .filter(|&id| positions[id].is_none())
        .collect();
    if missing.is_empty() {
        return 0;
    }

    let placed: Vec<Point> = positions.iter().flatten().copied().collect();
    let center = if placed.is_empty() {
        Point::ORIGIN
    } else {
        let max_x = placed.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let min_y = placed.iter().map(|p| p.y).fold(f64::MAX, f64::min);
        let max_y = placed.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        Point::new(max_x + PATCH_GAP + 1.0, (min_y + max_y) / 2.0)
    };

    let cluster = ForceLayout::default().place(graph, &missing, center, 1.0);
    for id in &missing {
        positions[*id] = cluster[*id];
    }
    missing.len()
}

/// Fruchterman-Reingold spring layout with deterministic seeding.
#[derive(Debug, Clone, Copy)]
pub struct ForceLayout {
    pub iterations: usize,
    /// Optimal edge length; `1/sqrt(n)` when unset
    pub k: Option<f64>,
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            k: None,
        }
    }
}

impl ForceLayout {
    /// Lay out the subgraph induced by `nodes`, rescaled so the largest
    /// coordinate offset from `center` equals `scale`. Edges are treated as
    /// undirected. Slots of nodes outside `nodes` stay `None`.
    pub fn place(&self, graph: &LayoutGraph, nodes: &[NodeId], center: Point, scale: f64) -> Positions {
        let mut positions = vec![None; graph.len()];
        let n = nodes.len();
        if n == 0 {
            return positions;
        }
        if n == 1 {
            positions[nodes[0]] = Some(center);
            return positions;
        }

        let mut local = vec![usize::MAX; graph.len()];
        for (i, &node) in nodes.iter().enumerate() {
            local[node] = i;
        }
        let mut adjacent = vec![vec![false; n]; n];
        for &(s, t) in graph.edges() {
            let (a, b) = (local[s], local[t]);
            if a != usize::MAX && b != usize::MAX && a != b {
                adjacent[a][b] = true;
                adjacent[b][a] = true;
            }
        }

        let mut pos = seed_positions(n);
        let k = self.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let mut temperature = 0.1;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut displacement = vec![(0.0f64, 0.0f64); n];
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let distance = (dx * dx + dy * dy).sqrt().max(0.01);
                    let mut force = k * k / distance;
                    if adjacent[i][j] {
                        force -= distance * distance / k;
                    }
                    displacement[i].0 += dx / distance * force;
                    displacement[i].1 += dy / distance * force;
                }
            }
            for i in 0..n {
                let (dx, dy) = displacement[i];
                let length = (dx * dx + dy * dy).sqrt().max(0.01);
                pos[i].0 += dx * temperature / length;
                pos[i].1 += dy * temperature / length;
            }
            temperature -= cooling;
        }

        for (i, (x, y)) in rescale(pos, scale).into_iter().enumerate() {
            positions[nodes[i]] = Some(Point::new(center.x + x, center.y + y));
        }
        positions
    }
}

/// Sunflower spiral: spread out, asymmetric, and reproducible.
fn seed_positions(n: usize) -> Vec<(f64, f64)> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let radius = ((i as f64 + 0.5) / n as f64).sqrt();
            let theta = golden_angle * i as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Center on the mean and scale so the largest |coordinate| equals `scale`.
fn rescale(mut pos: Vec<(f64, f64)>, scale: f64) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.1).sum::<f64>() / n;
    for p in &mut pos {
        p.0 -= mean_x;
        p.1 -= mean_y;
    }
    let limit = pos
        .iter()
        .map(|p| p.0.abs().max(p.1.abs()))
        .fold(0.0, f64::max);
    if limit > 0.0 {
        for p in &mut pos {
            p.0 *= scale / limit;
            p.1 *= scale / limit;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::concept_map::{ConceptEdge, ConceptGraph};

    fn layout_graph(root: &str, edges: &[(&str, &str)]) -> LayoutGraph {
        LayoutGraph::from_concept_graph(&ConceptGraph::new(
            LayoutKind::Tree,
            root,
            edges
                .iter()
                .map(|(s, t)| ConceptEdge::new(*s, *t, ""))
                .collect(),
        ))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hierarchy_splits_width_among_children() {
        let g = layout_graph("R", &[("R", "A"), ("R", "B"), ("A", "C")]);
        let pos = hierarchy(&g, 0, 10.0, 0.5).unwrap();
        let [r, a, b, c] = [pos[0], pos[1], pos[2], pos[3]].map(Option::unwrap);

        assert!(approx(r.x, 0.5) && approx(r.y, 0.0));
        assert!(approx(a.x, -2.0) && approx(a.y, -0.5));
        assert!(approx(b.x, 3.0) && approx(b.y, -0.5));
        assert!(approx(c.x, a.x) && approx(c.y, -1.0));
    }

    #[test]
    fn hierarchy_ignores_back_edges() {
        let g = layout_graph("A", &[("A", "B"), ("B", "C"), ("C", "A")]);
        let pos = hierarchy(&g, 0, 10.0, 0.5).unwrap();
        assert!(pos.iter().all(Option::is_some));
        assert!(approx(pos[2].unwrap().y, -1.0));
    }

    #[test]
    fn circular_puts_nodes_on_unit_circle() {
        let pos = circular(4, &[0, 1, 2, 3], Point::ORIGIN, 1.0);
        for p in pos.iter().flatten() {
            assert!(approx((p.x * p.x + p.y * p.y).sqrt(), 1.0));
        }
        assert!(approx(pos[0].unwrap().x, 1.0));
    }

    #[test]
    fn shell_centers_root() {
        let g = layout_graph("Hub", &[("Hub", "A"), ("Hub", "B"), ("Hub", "C")]);
        let pos = shell(&g, 0).unwrap();
        assert_eq!(pos[0], Some(Point::ORIGIN));
        for p in pos.iter().skip(1).flatten() {
            assert!(approx((p.x * p.x + p.y * p.y).sqrt(), 1.0));
        }
    }

    #[test]
    fn force_layout_is_deterministic_and_bounded() {
        let g = layout_graph("A", &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let nodes: Vec<NodeId> = g.node_ids().collect();
        let first = ForceLayout::default().place(&g, &nodes, Point::ORIGIN, 1.0);
        let second = ForceLayout::default().place(&g, &nodes, Point::ORIGIN, 1.0);
        assert_eq!(first, second);
        for p in first.iter().flatten() {
            assert!(p.is_finite());
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn disconnected_component_is_patched_beside_tree() {
        let g = layout_graph("A", &[("A", "B"), ("C", "D")]);
        let outcome = compute_layout(&g, 0, LayoutKind::Tree);
        assert_eq!(outcome.patched_nodes, 2);
        assert_eq!(outcome.positions.len(), 4);
        let tree_max_x = outcome.positions[0].x.max(outcome.positions[1].x);
        assert!(outcome.positions[2].x > tree_max_x);
        assert!(outcome.positions[3].x > tree_max_x);
        assert!(outcome.fallback_reason.is_none());
    }

    #[test]
    fn single_node_layout_for_every_kind() {
        let g = layout_graph("Only", &[]);
        for kind in [LayoutKind::Tree, LayoutKind::Cycle, LayoutKind::Star, LayoutKind::Other] {
            let outcome = compute_layout(&g, 0, kind);
            assert_eq!(outcome.positions, vec![Point::new(if kind == LayoutKind::Tree { 0.5 } else { 0.0 }, 0.0)]);
            assert_eq!(outcome.patched_nodes, 0);
        }
    }

    #[test]
    fn invalid_root_falls_back_to_force_layout() {
        let g = layout_graph("A", &[("A", "B")]);
        let outcome = compute_layout(&g, 7, LayoutKind::Tree);
        assert!(outcome.fallback_reason.is_some());
        assert!(outcome.positions.iter().all(Point::is_finite));
    }
}
