//! Render-neutral description of a concept-map image.
//!
//! [`build_scene`] runs the whole pipeline up to, but not including,
//! encoding: filtering, root resolution, depths, layout, label wrapping,
//! styling, and the mapping from layout units to canvas pixels.

use super::layout::{LayoutOutcome, Point, compute_layout};
use super::layout_graph::LayoutGraph;
use crate::core::error::DomainError;
use crate::core::text::{take_chars, wrap_words};
use crate::study::concept_map::{ConceptGraph, LayoutKind};

pub const CANVAS_WIDTH: f64 = 1690.0;
pub const CANVAS_HEIGHT: f64 = 1170.0;
pub const BACKGROUND: &str = "#f8fafc";
pub const EDGE_COLOR: &str = "#94a3b8";
pub const TEXT_COLOR: &str = "#1e293b";
pub const TITLE_COLOR: &str = "#064e3b";
pub const ERROR_COLOR: &str = "#dc2626";

/// Border colors by depth (`depth % len`)
pub const DEPTH_PALETTE: [&str; 6] = [
    "#ef4444", // red
    "#3b82f6", // blue
    "#22c55e", // green
    "#f97316", // orange
    "#8b5cf6", // purple
    "#06b6d4", // cyan
];

const LABEL_WRAP_CHARS: usize = 18;
const BASE_FONT_PX: f64 = 18.0;
const ROOT_FONT_PX: f64 = 22.0;
const TITLE_FONT_PX: f64 = 36.0;
const PLACEHOLDER_FONT_PX: f64 = 25.0;
const CHAR_WIDTH_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.25;
const BOX_PADDING_EM: f64 = 0.5;
const TITLE_AREA: f64 = 110.0;
const MARGIN: f64 = 40.0;
const PLACEHOLDER_MESSAGE_CHARS: usize = 100;

/// Centered multi-line text
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub lines: Vec<String>,
    pub center: Point,
    pub font_size: f64,
    pub font_weight: u16,
    pub color: &'static str,
}

impl Caption {
    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_RATIO
    }
}

/// A node drawn as a bordered, rounded label box
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub name: String,
    pub label: Caption,
    pub width: f64,
    pub height: f64,
    pub border_color: &'static str,
    pub depth: Option<usize>,
    pub is_root: bool,
}

/// Elbow line: vertical from the source, then horizontal into the target
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub points: [Point; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
    pub background: &'static str,
    pub title: Caption,
    pub connectors: Vec<Connector>,
    pub nodes: Vec<NodeBox>,
    /// Set when the requested layout failed and force-directed was used
    pub layout_fallback: Option<String>,
    pub patched_nodes: usize,
}

impl MapScene {
    /// Scene shown instead of a map when rendering failed.
    pub fn placeholder(message: &str) -> Self {
        let mut lines = vec!["Map Generation Failed:".to_string()];
        lines.extend(wrap_words(
            take_chars(message, PLACEHOLDER_MESSAGE_CHARS),
            60,
        ));
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: BACKGROUND,
            title: Caption {
                lines,
                center: Point::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
                font_size: PLACEHOLDER_FONT_PX,
                font_weight: 400,
                color: ERROR_COLOR,
            },
            connectors: Vec::new(),
            nodes: Vec::new(),
            layout_fallback: None,
            patched_nodes: 0,
        }
    }

    pub fn root(&self) -> Option<&NodeBox> {
        self.nodes.iter().find(|n| n.is_root)
    }
}

/// Title suffix for a layout kind
pub fn title_suffix(kind: LayoutKind) -> &'static str {
    match kind {
        LayoutKind::Tree => "Organizational Chart",
        _ => "Concept Map",
    }
}

/// Lay out and style `graph` on the canvas.
pub fn build_scene(graph: &ConceptGraph) -> Result<MapScene, DomainError> {
    let layout_graph = LayoutGraph::from_concept_graph(graph);
    let root = layout_graph.resolve_root(&graph.root);
    let depths = layout_graph.bfs_tree(root).depth;

    let LayoutOutcome {
        positions,
        fallback_reason,
        patched_nodes,
    } = compute_layout(&layout_graph, root, graph.layout);

    if let Some(bad) = positions.iter().find(|p| !p.is_finite()) {
        return Err(DomainError::Layout(format!(
            "node placed at non-finite coordinate ({}, {})",
            bad.x, bad.y
        )));
    }

    let mut nodes: Vec<NodeBox> = layout_graph
        .node_ids()
        .map(|id| {
            let is_root = id == root;
            let depth = depths[id];
            let font_size = if is_root { ROOT_FONT_PX } else { BASE_FONT_PX };
            let lines = wrap_words(layout_graph.name(id), LABEL_WRAP_CHARS);
            let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            let padding = 2.0 * BOX_PADDING_EM * font_size;
            NodeBox {
                name: layout_graph.name(id).to_string(),
                width: widest as f64 * font_size * CHAR_WIDTH_RATIO + padding,
                height: lines.len() as f64 * font_size * LINE_HEIGHT_RATIO + padding,
                label: Caption {
                    lines,
                    center: Point::ORIGIN,
                    font_size,
                    font_weight: if is_root { 700 } else { 600 },
                    color: TEXT_COLOR,
                },
                border_color: DEPTH_PALETTE[depth.unwrap_or(0) % DEPTH_PALETTE.len()],
                depth,
                is_root,
            }
        })
        .collect();

    let canvas = CanvasMapping::fit(&positions, &nodes);
    for (node, position) in nodes.iter_mut().zip(&positions) {
        node.label.center = canvas.map(*position);
    }

    let connectors = layout_graph
        .edges()
        .iter()
        .filter(|(s, t)| s != t)
        .map(|&(s, t)| {
            let from = nodes[s].label.center;
            let to = nodes[t].label.center;
            Connector {
                points: [from, Point::new(from.x, to.y), to],
            }
        })
        .collect();

    Ok(MapScene {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        background: BACKGROUND,
        title: Caption {
            lines: vec![format!(
                "{} {}",
                layout_graph.name(root),
                title_suffix(graph.layout)
            )],
            center: Point::new(CANVAS_WIDTH / 2.0, TITLE_AREA / 2.0),
            font_size: TITLE_FONT_PX,
            font_weight: 700,
            color: TITLE_COLOR,
        },
        connectors,
        nodes,
        layout_fallback: fallback_reason,
        patched_nodes,
    })
}

/// Affine map from layout units (y up) to canvas pixels (y down), keeping
/// every box inside the plot area.
struct CanvasMapping {
    min: Point,
    max: Point,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl CanvasMapping {
    fn fit(positions: &[Point], nodes: &[NodeBox]) -> Self {
        let half_w = nodes.iter().map(|n| n.width / 2.0).fold(0.0, f64::max);
        let half_h = nodes.iter().map(|n| n.height / 2.0).fold(0.0, f64::max);

        let (mut left, mut right) = (MARGIN + half_w, CANVAS_WIDTH - MARGIN - half_w);
        if right < left {
            left = CANVAS_WIDTH / 2.0;
            right = left;
        }
        let (mut top, mut bottom) = (TITLE_AREA + half_h, CANVAS_HEIGHT - MARGIN - half_h);
        if bottom < top {
            top = (TITLE_AREA + CANVAS_HEIGHT) / 2.0;
            bottom = top;
        }

        let min = Point::new(
            positions.iter().map(|p| p.x).fold(f64::MAX, f64::min),
            positions.iter().map(|p| p.y).fold(f64::MAX, f64::min),
        );
        let max = Point::new(
            positions.iter().map(|p| p.x).fold(f64::MIN, f64::max),
            positions.iter().map(|p| p.y).fold(f64::MIN, f64::max),
        );

        Self {
            min,
            max,
            left,
            right,
            top,
            bottom,
        }
    }

    fn map(&self, p: Point) -> Point {
        let x = interpolate(p.x, self.min.x, self.max.x, self.left, self.right);
        // Larger layout y is higher on the page
        let y = interpolate(p.y, self.max.y, self.min.y, self.top, self.bottom);
        Point::new(x, y)
    }
}

fn interpolate(value: f64, from_a: f64, from_b: f64, to_a: f64, to_b: f64) -> f64 {
    let span = from_b - from_a;
    if span.abs() < 1e-12 {
        return (to_a + to_b) / 2.0;
    }
    to_a + (value - from_a) / span * (to_b - to_a)
}
