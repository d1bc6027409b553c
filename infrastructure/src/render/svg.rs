//! SVG encoding of concept-map scenes.

use std::fmt::Write;
use studybuddy_application::{MapRenderer, RenderedImage};
use studybuddy_domain::graph::scene::{Caption, EDGE_COLOR, MapScene, build_scene};
use studybuddy_domain::{ConceptGraph, Point};
use tracing::{debug, warn};

pub const SVG_MIME_TYPE: &str = "image/svg+xml";

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const NODE_FILL: &str = "#ffffff";
const NODE_CORNER_RADIUS: f64 = 8.0;
const NODE_BORDER_WIDTH: f64 = 2.5;
const CONNECTOR_WIDTH: f64 = 1.5;

/// Renders concept graphs as standalone SVG documents
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgMapRenderer;

impl SvgMapRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MapRenderer for SvgMapRenderer {
    fn render(&self, graph: &ConceptGraph) -> RenderedImage {
        let scene = match build_scene(graph) {
            Ok(scene) => {
                if let Some(reason) = &scene.layout_fallback {
                    warn!("Layout fell back to force-directed: {}", reason);
                }
                if scene.patched_nodes > 0 {
                    debug!("Placed {} disconnected node(s) separately", scene.patched_nodes);
                }
                scene
            }
            Err(e) => {
                warn!("Map rendering failed, drawing placeholder: {}", e);
                MapScene::placeholder(&e.to_string())
            }
        };
        RenderedImage::new(SVG_MIME_TYPE, encode_svg(&scene).into_bytes())
    }
}

/// Serialize a scene to SVG markup.
pub fn encode_svg(scene: &MapScene) -> String {
    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut svg, scene);
    svg
}

fn write_document(out: &mut String, scene: &MapScene) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}">"#,
        w = scene.width,
        h = scene.height,
    )?;
    writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        scene.background
    )?;

    writeln!(
        out,
        r#"<g fill="none" stroke="{EDGE_COLOR}" stroke-width="{CONNECTOR_WIDTH}">"#
    )?;
    for connector in &scene.connectors {
        let points: Vec<String> = connector.points.iter().map(format_point).collect();
        writeln!(out, r#"<polyline points="{}"/>"#, points.join(" "))?;
    }
    writeln!(out, "</g>")?;

    for node in &scene.nodes {
        let center = node.label.center;
        writeln!(
            out,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{NODE_CORNER_RADIUS}" fill="{NODE_FILL}" stroke="{}" stroke-width="{NODE_BORDER_WIDTH}"/>"#,
            center.x - node.width / 2.0,
            center.y - node.height / 2.0,
            node.width,
            node.height,
            node.border_color,
        )?;
        write_caption(out, &node.label)?;
    }

    write_caption(out, &scene.title)?;
    writeln!(out, "</svg>")
}

/// Lines are centered on `caption.center`, horizontally and vertically.
fn write_caption(out: &mut String, caption: &Caption) -> std::fmt::Result {
    let line_height = caption.line_height();
    let first_baseline = caption.center.y - line_height * (caption.lines.len() as f64 - 1.0) / 2.0;

    writeln!(
        out,
        r#"<text text-anchor="middle" dominant-baseline="central" font-size="{}" font-weight="{}" fill="{}">"#,
        caption.font_size, caption.font_weight, caption.color
    )?;
    for (i, line) in caption.lines.iter().enumerate() {
        writeln!(
            out,
            r#"<tspan x="{:.1}" y="{:.1}">{}</tspan>"#,
            caption.center.x,
            first_baseline + line_height * i as f64,
            escape_xml(line)
        )?;
    }
    writeln!(out, "</text>")
}

fn format_point(p: &Point) -> String {
    format!("{:.1},{:.1}", p.x, p.y)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_domain::{ConceptEdge, LayoutKind, canned_hierarchy};

    fn render(graph: &ConceptGraph) -> String {
        let image = SvgMapRenderer::new().render(graph);
        assert_eq!(image.mime_type, SVG_MIME_TYPE);
        String::from_utf8(image.bytes).unwrap()
    }

    #[test]
    fn test_renders_nodes_connectors_and_title() {
        let graph = ConceptGraph::new(
            LayoutKind::Tree,
            "Cell",
            vec![
                ConceptEdge::new("Cell", "Nucleus", "contains"),
                ConceptEdge::new("Cell", "Membrane", "contains"),
            ],
        );
        let svg = render(&graph);

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<rect ").count(), 3 + 1);
        assert!(svg.contains(">Cell Organizational Chart</tspan>"));
        assert!(svg.contains(">Nucleus</tspan>"));
    }

    #[test]
    fn test_escapes_markup_in_labels() {
        let graph = ConceptGraph::new(
            LayoutKind::Star,
            "R&D",
            vec![ConceptEdge::new("R&D", "<script>", "")],
        );
        let svg = render(&graph);
        assert!(svg.contains("R&amp;D Concept Map"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_empty_graph_renders_single_node() {
        let svg = render(&ConceptGraph::new(LayoutKind::Tree, "", Vec::new()));
        assert!(svg.contains(">System</tspan>"));
        assert_eq!(svg.matches("<polyline").count(), 0);
    }

    #[test]
    fn test_canned_hierarchy_renders() {
        let svg = render(&canned_hierarchy("court").unwrap());
        assert!(svg.contains("Supreme Court Organizational Chart"));
        assert_eq!(svg.matches("<polyline").count(), 17);
    }

    #[test]
    fn test_placeholder_scene_encodes_message() {
        let svg = encode_svg(&MapScene::placeholder("layout exploded"));
        assert!(svg.contains(">Map Generation Failed:</tspan>"));
        assert!(svg.contains(">layout exploded</tspan>"));
        assert!(svg.contains("#dc2626"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let graph = ConceptGraph::new(
            LayoutKind::Other,
            "A",
            vec![ConceptEdge::new("A", "B", ""), ConceptEdge::new("C", "D", "")],
        );
        assert_eq!(render(&graph), render(&graph));
    }
}
