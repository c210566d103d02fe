//! Integration tests: graph model ↔ layout engine ↔ wire documents.
//!
//! Exercises the load → auto-fit pipeline and the model's invariants
//! through the public `pb-core` API.

use pb_core::id::NodeId;
use pb_core::layout::{CanvasSize, FIT_MARGIN, Viewport, auto_fit};
use pb_core::model::{GRID_PITCH, GraphModel};
use pb_core::protocol::{EdgeRecord, GraphDocument, NodeRecord};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 520.0,
};

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

fn record(id: &str, name: &str, x: Option<f64>, y: Option<f64>) -> NodeRecord {
    NodeRecord {
        id: NodeId::intern(id),
        name: Some(name.to_string()),
        x,
        y,
    }
}

fn edge(a: &str, b: &str, w: f64) -> EdgeRecord {
    EdgeRecord {
        a: NodeId::intern(a),
        b: NodeId::intern(b),
        w,
    }
}

fn campus() -> GraphDocument {
    GraphDocument {
        nodes: vec![
            record("1", "Gate", Some(300.0), Some(200.0)),
            record("2", "Library", Some(500.0), Some(260.0)),
            record("3", "Hall", Some(420.0), Some(900.0)),
        ],
        edges: vec![edge("1", "2", 40.0), edge("2", "3", 60.0)],
    }
}

fn positions(model: &GraphModel) -> Vec<(f64, f64)> {
    model.nodes().map(|n| (n.x, n.y)).collect()
}

// ─── Loading ─────────────────────────────────────────────────────────────

#[test]
fn load_keeps_valid_coordinates() {
    let mut model = GraphModel::new();
    let report = model.load_from(campus(), VIEWPORT);
    assert!(!report.fallback_layout);
    assert_eq!(report.nodes, 3);
    assert_eq!(report.edges, 2);
    assert_eq!(
        positions(&model),
        vec![(300.0, 200.0), (500.0, 260.0), (420.0, 900.0)]
    );
}

#[test]
fn one_missing_coordinate_triggers_full_fallback() {
    let mut doc = campus();
    doc.nodes[1].y = None;
    let mut model = GraphModel::new();
    let report = model.load_from(doc, VIEWPORT);
    assert!(report.fallback_layout);
    // the valid first node was moved too
    let first = model.get(id("1")).unwrap();
    assert_ne!((first.x, first.y), (300.0, 200.0));
    assert!(model.nodes().all(|n| n.has_finite_position()));
}

#[test]
fn load_recomputes_sequence_from_numeric_ids() {
    let doc = GraphDocument {
        nodes: vec![
            record("T4", "A", Some(0.0), Some(0.0)),
            record("T11", "B", Some(60.0), Some(0.0)),
        ],
        edges: vec![],
    };
    let mut model = GraphModel::new();
    model.load_from(doc, VIEWPORT);
    assert_eq!(model.next_sequence(), 12);
    assert_eq!(model.default_name(), "N12");
}

#[test]
fn load_without_numeric_ids_uses_count_plus_one() {
    let doc = GraphDocument {
        nodes: vec![
            record("gate", "Gate", Some(0.0), Some(0.0)),
            record("hall", "Hall", Some(60.0), Some(0.0)),
        ],
        edges: vec![],
    };
    let mut model = GraphModel::new();
    model.load_from(doc, VIEWPORT);
    assert_eq!(model.next_sequence(), 3);
}

#[test]
fn load_drops_malformed_edges_and_duplicate_nodes() {
    let mut doc = campus();
    doc.nodes.push(record("1", "Shadow", Some(0.0), Some(0.0)));
    doc.edges.push(edge("1", "1", 5.0));
    doc.edges.push(edge("1", "99", 5.0));
    doc.edges.push(edge("3", "1", f64::NAN));
    let mut model = GraphModel::new();
    let report = model.load_from(doc, VIEWPORT);
    assert_eq!(report.dropped_nodes, 1);
    assert_eq!(report.dropped_edges, 2);
    assert_eq!(model.get(id("1")).unwrap().name, "Gate");
    let weights: Vec<f64> = model.edges().map(|e| e.w).collect();
    assert_eq!(weights, vec![40.0, 60.0, 1.0]);
}

#[test]
fn save_then_load_round_trips() {
    let mut model = GraphModel::new();
    model.add_node(0.0, 0.0, Some("Gate"));
    model.add_node(120.0, 0.0, Some("Library"));
    model.add_node(120.0, 120.0, Some("Gate"));
    model.add_edge(id("1"), id("2"), 5.0);
    model.add_edge(id("3"), id("2"), 3.0);

    let json = serde_json::to_string(&model.to_document()).unwrap();
    let doc: GraphDocument = serde_json::from_str(&json).unwrap();

    let mut restored = GraphModel::new();
    let report = restored.load_from(doc, VIEWPORT);
    assert!(!report.fallback_layout);

    let summary = |m: &GraphModel| {
        (
            m.nodes()
                .map(|n| (n.id, n.name.clone(), n.x, n.y))
                .collect::<Vec<_>>(),
            m.edges().map(|e| (e.a, e.b, e.w)).collect::<Vec<_>>(),
        )
    };
    assert_eq!(summary(&restored), summary(&model));
}

// ─── Auto-fit ────────────────────────────────────────────────────────────

#[test]
fn auto_fit_moves_min_corner_to_margin_and_grows_canvas() {
    let mut model = GraphModel::new();
    model.load_from(campus(), VIEWPORT);
    let size = auto_fit(&mut model, VIEWPORT);

    let min_x = model.nodes().map(|n| n.x).fold(f64::INFINITY, f64::min);
    let min_y = model.nodes().map(|n| n.y).fold(f64::INFINITY, f64::min);
    assert_eq!((min_x, min_y), (FIT_MARGIN, FIT_MARGIN));
    // bbox 200 x 700 → needs 280 x 780; width stays at the container's 800
    assert_eq!(
        size,
        CanvasSize {
            width: 800,
            height: 780
        }
    );
}

#[test]
fn auto_fit_is_idempotent_from_snapshot() {
    let mut model = GraphModel::new();
    model.load_from(campus(), VIEWPORT);
    let first_size = auto_fit(&mut model, VIEWPORT);
    let once = positions(&model);
    let second_size = auto_fit(&mut model, VIEWPORT);
    assert_eq!(positions(&model), once);
    assert_eq!(first_size, second_size);
}

#[test]
fn auto_fit_keeps_nodes_added_after_load() {
    let mut model = GraphModel::new();
    model.load_from(campus(), VIEWPORT);
    auto_fit(&mut model, VIEWPORT);
    model.add_node(600.0, 600.0, None);
    let before = positions(&model);

    // the added node is not the bbox minimum, so nothing should move
    let size = auto_fit(&mut model, VIEWPORT);
    assert_eq!(positions(&model), before);
    assert_eq!(auto_fit(&mut model, VIEWPORT), size);
    assert_eq!(positions(&model), before);
    assert_eq!(model.original_position(id("1")).map(|p| (p.x, p.y)), Some((300.0, 200.0)));
}

#[test]
fn node_added_left_of_graph_shifts_everything_once() {
    let mut model = GraphModel::new();
    model.load_from(campus(), VIEWPORT);
    auto_fit(&mut model, VIEWPORT);
    let added = model.add_node(0.0, 0.0, None).id;

    auto_fit(&mut model, VIEWPORT);
    let once = positions(&model);
    auto_fit(&mut model, VIEWPORT);
    assert_eq!(positions(&model), once);

    // the new node is now the top-left corner; the rest kept their offsets to it
    let corner = model.get(added).unwrap();
    assert_eq!((corner.x, corner.y), (FIT_MARGIN, FIT_MARGIN));
    let gate = model.get(id("1")).unwrap();
    assert_eq!((gate.x - corner.x, gate.y - corner.y), (40.0, 40.0));
}

// ─── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn snapped_position_stays_within_one_pitch(x in -5000.0f64..5000.0, y in -5000.0f64..5000.0) {
        let mut model = GraphModel::new();
        let node = model.add_node(x, y, None);
        prop_assert!((node.x - x).abs() < GRID_PITCH);
        prop_assert!((node.y - y).abs() < GRID_PITCH);
    }

    #[test]
    fn invalid_edges_never_change_edge_count(w in proptest::num::f64::ANY, pick in 0usize..3) {
        let mut model = GraphModel::new();
        model.add_node(0.0, 0.0, None);
        model.add_node(60.0, 0.0, None);
        let (a, b) = match pick {
            0 => (id("1"), id("1")),
            1 => (id("1"), id("ghost")),
            _ => (id("ghost"), id("2")),
        };
        prop_assert!(model.add_edge(a, b, w).is_none());
        prop_assert_eq!(model.edge_count(), 0);
    }

    #[test]
    fn auto_fit_twice_equals_once(
        coords in proptest::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 1..12),
        added in proptest::collection::vec((-3000.0f64..3000.0, -3000.0f64..3000.0), 0..4),
    ) {
        let doc = GraphDocument {
            nodes: coords
                .iter()
                .enumerate()
                .map(|(i, (x, y))| record(&(i + 1).to_string(), "n", Some(*x), Some(*y)))
                .collect(),
            edges: vec![],
        };
        let mut model = GraphModel::new();
        model.load_from(doc, VIEWPORT);
        auto_fit(&mut model, VIEWPORT);
        for (x, y) in &added {
            model.add_node(*x, *y, None);
        }
        auto_fit(&mut model, VIEWPORT);
        let once = positions(&model);
        auto_fit(&mut model, VIEWPORT);
        prop_assert_eq!(positions(&model), once);
    }
}
