//! Graph → draw-surface commands.
//!
//! Redraws everything on each call: edges (insertion order) with their weight
//! labels, then nodes with name labels, then selection rings on top. Reads
//! state only; nothing here moves a node.

use crate::surface::{DrawSurface, Font, Glow, Stroke};
use crate::theme::Theme;
use kurbo::{Point, Rect};
use pb_core::id::NodeId;
use pb_core::layout::CanvasSize;
use pb_core::model::{Edge, GraphModel, Node, PathHighlight};

/// Radius of a drawn node.
pub const NODE_RADIUS: f64 = 8.0;
/// Radius of the selection rings drawn around nodes.
pub const RING_RADIUS: f64 = 14.0;

const EDGE_WIDTH: f64 = 2.0;
const PATH_EDGE_WIDTH: f64 = 4.0;
const GLOW_BLUR: f64 = 6.0;
const RING_WIDTH: f64 = 3.0;
const NODE_BORDER_WIDTH: f64 = 2.0;

const LABEL_FONT: Font = Font::new(11.0, "Poppins, sans-serif");
const NODE_FONT: Font = Font::new(12.0, "Poppins, sans-serif");
const PLATE_PAD: f64 = 4.0;
const PLATE_HEIGHT: f64 = 14.0;
const NAME_OFFSET: (f64, f64) = (12.0, -8.0);

/// Everything the painter reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub model: &'a GraphModel,
    pub highlight: &'a PathHighlight,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    /// First endpoint of an edge under construction.
    pub pending_source: Option<NodeId>,
}

impl<'a> Scene<'a> {
    /// A scene with no selections or highlight.
    pub fn plain(model: &'a GraphModel, highlight: &'a PathHighlight) -> Self {
        Self {
            model,
            highlight,
            start: None,
            end: None,
            pending_source: None,
        }
    }
}

/// Paint the whole scene. Call on every state change; there's no diffing.
pub fn paint_graph<S: DrawSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
    size: CanvasSize,
    theme: &Theme,
) {
    surface.clear(size);
    if let Some(bg) = theme.background {
        surface.fill_rect(
            Rect::new(0.0, 0.0, size.width as f64, size.height as f64),
            bg,
        );
    }

    for edge in scene.model.edges() {
        paint_edge(surface, scene, edge, theme);
    }

    for node in scene.model.nodes() {
        paint_node(surface, node, theme);
    }

    let rings = [
        (scene.pending_source, theme.ring_source),
        (scene.start, theme.ring_start),
        (scene.end, theme.ring_end),
    ];
    for (id, color) in rings {
        if let Some(node) = id.and_then(|id| scene.model.get(id)) {
            paint_ring(surface, node, color);
        }
    }
}

fn paint_edge<S: DrawSurface + ?Sized>(surface: &mut S, scene: &Scene<'_>, edge: &Edge, theme: &Theme) {
    let (Some(a), Some(b)) = (scene.model.get(edge.a), scene.model.get(edge.b)) else {
        return;
    };
    if !a.has_finite_position() || !b.has_finite_position() {
        return;
    }
    let on_path = scene.highlight.contains(edge);
    let stroke = if on_path {
        Stroke {
            color: theme.edge_path,
            width: PATH_EDGE_WIDTH,
            glow: Some(Glow {
                color: theme.edge_glow,
                blur: GLOW_BLUR,
            }),
        }
    } else {
        Stroke::solid(theme.edge, EDGE_WIDTH)
    };
    surface.line(a.position(), b.position(), &stroke);

    let mid = a.position().midpoint(b.position());
    let text = weight_label(edge.w);
    let plate_w = surface.measure_text(&text, &LABEL_FONT) + PLATE_PAD * 2.0;
    let plate = Rect::from_center_size(mid, (plate_w, PLATE_HEIGHT));
    surface.fill_rect(plate, theme.label_plate);
    let text_color = if on_path {
        theme.label_text_path
    } else {
        theme.label_text
    };
    surface.text(
        Point::new(plate.x0 + PLATE_PAD, mid.y + PLATE_PAD),
        &text,
        &LABEL_FONT,
        text_color,
    );
}

fn paint_node<S: DrawSurface + ?Sized>(surface: &mut S, node: &Node, theme: &Theme) {
    if !node.has_finite_position() {
        log::trace!("skip node {} without position", node.id);
        return;
    }
    let center = node.position();
    surface.circle(
        center,
        NODE_RADIUS,
        Some(theme.node_fill),
        Some(&Stroke::solid(theme.node_border, NODE_BORDER_WIDTH)),
    );
    let label = if node.name.is_empty() {
        node.id.as_str()
    } else {
        node.name.as_str()
    };
    surface.text(
        Point::new(center.x + NAME_OFFSET.0, center.y + NAME_OFFSET.1),
        label,
        &NODE_FONT,
        theme.node_label,
    );
}

fn paint_ring<S: DrawSurface + ?Sized>(surface: &mut S, node: &Node, color: &'static str) {
    if !node.has_finite_position() {
        return;
    }
    surface.circle(
        node.position(),
        RING_RADIUS,
        None,
        Some(&Stroke::solid(color, RING_WIDTH)),
    );
}

/// Edge label text: weight rounded to whole metres.
pub fn weight_label(w: f64) -> String {
    format!("{} m", w.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn two_node_model() -> GraphModel {
        let mut model = GraphModel::new();
        model.add_node(0.0, 0.0, Some("Gate"));
        model.add_node(120.0, 0.0, Some("Hall"));
        model.add_edge(NodeId::intern("1"), NodeId::intern("2"), 12.4);
        model
    }

    #[test]
    fn weight_labels_round_to_whole_numbers() {
        assert_eq!(weight_label(12.4), "12 m");
        assert_eq!(weight_label(8.0), "8 m");
        assert_eq!(weight_label(2.5), "3 m");
    }

    #[test]
    fn draws_edges_then_nodes_then_labels() {
        let model = two_node_model();
        let highlight = PathHighlight::new();
        let mut surface = RecordingSurface::new();
        paint_graph(
            &mut surface,
            &Scene::plain(&model, &highlight),
            CanvasSize::default(),
            &Theme::light(),
        );

        assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
        assert!(matches!(surface.commands[1], DrawCommand::Line { .. }));
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["12 m", "Gate", "Hall"]);
        assert_eq!(surface.rings().count(), 0);
    }

    #[test]
    fn label_plate_is_centred_on_the_midpoint() {
        let model = two_node_model();
        let highlight = PathHighlight::new();
        let mut surface = RecordingSurface::new();
        paint_graph(
            &mut surface,
            &Scene::plain(&model, &highlight),
            CanvasSize::default(),
            &Theme::light(),
        );
        let plate = surface
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        let c = plate.center();
        assert!((c.x - 60.0).abs() < 1e-9 && c.y.abs() < 1e-9);
        assert!((plate.height() - PLATE_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn rings_mark_source_start_and_end() {
        let model = two_node_model();
        let highlight = PathHighlight::new();
        let theme = Theme::light();
        let scene = Scene {
            model: &model,
            highlight: &highlight,
            start: Some(NodeId::intern("1")),
            end: Some(NodeId::intern("2")),
            pending_source: Some(NodeId::intern("2")),
        };
        let mut surface = RecordingSurface::new();
        paint_graph(&mut surface, &scene, CanvasSize::default(), &theme);
        let colors: Vec<&str> = surface.rings().map(|(_, s)| s.color).collect();
        assert_eq!(colors, vec![theme.ring_source, theme.ring_start, theme.ring_end]);
    }

    #[test]
    fn dark_theme_paints_background() {
        let model = GraphModel::new();
        let highlight = PathHighlight::new();
        let mut surface = RecordingSurface::new();
        paint_graph(
            &mut surface,
            &Scene::plain(&model, &highlight),
            CanvasSize::default(),
            &Theme::dark(),
        );
        assert!(matches!(
            surface.commands[1],
            DrawCommand::FillRect { color: "#1C1C1E", .. }
        ));
    }
}
