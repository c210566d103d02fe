//! Graph data model.
//!
//! The graph is an undirected multigraph stored in a petgraph `UnGraph`.
//! Nodes and edges are only ever appended (or cleared wholesale), so petgraph
//! indices double as insertion order, which the renderer and hit-tester rely
//! on. An id index gives O(1) lookup by `NodeId`.

use crate::id::NodeId;
use crate::layout::{self, Viewport};
use crate::protocol::{EdgeRecord, GraphDocument, NodeRecord};
use kurbo::{Point, Vec2};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Pitch of the placement grid new nodes snap to.
pub const GRID_PITCH: f64 = 60.0;

/// Weight used when the supplied one is not a finite positive number.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ─── Nodes & edges ───────────────────────────────────────────────────────

/// A graph node. `id` is identity; `name` is display-only and may repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An undirected weighted edge. `a`/`b` carry no ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub w: f64,
}

impl Edge {
    /// True if this edge joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// An unweighted `{a, b}` pair, as reported on a solver's edge path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub a: NodeId,
    pub b: NodeId,
}

impl EdgeRef {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    /// Orientation-insensitive match against a model edge.
    pub fn matches(&self, edge: &Edge) -> bool {
        edge.connects(self.a, self.b)
    }
}

/// Edges of the most recent solved path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathHighlight {
    edges: SmallVec<[EdgeRef; 8]>,
}

impl PathHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the highlighted set wholesale.
    pub fn replace(&mut self, edges: impl IntoIterator<Item = EdgeRef>) {
        self.edges.clear();
        self.edges.extend(edges);
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|r| r.matches(edge))
    }

    pub fn edges(&self) -> &[EdgeRef] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Round a coordinate to the nearest grid line.
pub fn snap_to_grid(v: f64) -> f64 {
    (v / GRID_PITCH).round() * GRID_PITCH
}

/// Finite positive weights pass through; anything else becomes 1.
pub fn coerce_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        DEFAULT_WEIGHT
    }
}

/// What `load_from` had to do to make the document usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes: usize,
    pub edges: usize,
    /// The circular fallback replaced all coordinates.
    pub fallback_layout: bool,
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
}

// ─── Graph model ─────────────────────────────────────────────────────────

/// The authoritative node/edge collections plus the id sequence counter and
/// the coordinates captured at load time.
#[derive(Debug, Clone)]
pub struct GraphModel {
    graph: UnGraph<Node, Edge>,
    id_index: HashMap<NodeId, NodeIndex>,
    next_seq: u64,
    original: HashMap<NodeId, Point>,
    /// Displacement of current positions from the snapshot frame.
    fit_offset: Vec2,
}

impl Default for GraphModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphModel {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            id_index: HashMap::new(),
            next_seq: 1,
            original: HashMap::new(),
            fit_offset: Vec2::ZERO,
        }
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.id_index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Display name for `id`, falling back to the id itself.
    pub fn display_name(&self, id: NodeId) -> String {
        self.get(id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| id.as_str().to_string())
    }

    /// The sequence number the next node will receive.
    pub fn next_sequence(&self) -> u64 {
        let mut seq = self.next_seq;
        while self.id_index.contains_key(&NodeId::from_sequence(seq)) {
            seq += 1;
        }
        seq
    }

    /// Name a new node gets when the user supplies none.
    pub fn default_name(&self) -> String {
        format!("N{}", self.next_sequence())
    }

    /// Add a node at the grid point nearest `(x, y)`.
    ///
    /// A blank or missing name falls back to `N{seq}`. Non-finite input
    /// coordinates are treated as 0 so the placed node is always finite.
    pub fn add_node(&mut self, x: f64, y: f64, name: Option<&str>) -> &Node {
        let seq = self.next_sequence();
        let id = NodeId::from_sequence(seq);
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => format!("N{seq}"),
        };
        let x = if x.is_finite() { x } else { 0.0 };
        let y = if y.is_finite() { y } else { 0.0 };
        let node = Node {
            id,
            name,
            x: snap_to_grid(x),
            y: snap_to_grid(y),
        };
        log::debug!("add node {} {:?} at ({}, {})", id, node.name, node.x, node.y);
        if self.has_snapshot() {
            self.original.insert(id, node.position() - self.fit_offset);
        }
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        self.next_seq = seq + 1;
        &self.graph[idx]
    }

    /// Add an undirected edge. Returns `None` (and changes nothing) for a
    /// self-loop or an unknown endpoint.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, w: f64) -> Option<&Edge> {
        if a == b {
            log::debug!("rejected self-loop on {a}");
            return None;
        }
        let (&ia, &ib) = (self.id_index.get(&a)?, self.id_index.get(&b)?);
        let edge = Edge {
            a,
            b,
            w: coerce_weight(w),
        };
        log::debug!("add edge {a} - {b} (w = {})", edge.w);
        let idx = self.graph.add_edge(ia, ib, edge);
        self.graph.edge_weight(idx)
    }

    /// Drop every node and edge, restart the sequence at 1.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.id_index.clear();
        self.original.clear();
        self.fit_offset = Vec2::ZERO;
        self.next_seq = 1;
    }

    /// Replace the model with a loaded document.
    ///
    /// If any node lacks finite coordinates, the whole set is laid out on a
    /// circle instead. Duplicate node ids keep their first occurrence; edges
    /// that would break the model's invariants are dropped.
    pub fn load_from(&mut self, doc: GraphDocument, viewport: Viewport) -> LoadReport {
        self.reset();
        let mut report = LoadReport::default();

        let total = doc.nodes.len();
        let mut seen = HashSet::new();
        let records: Vec<NodeRecord> = doc
            .nodes
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.id);
                if !fresh {
                    log::warn!("dropping duplicate node id {}", r.id);
                }
                fresh
            })
            .collect();
        report.dropped_nodes = total - records.len();

        let all_placed = records.iter().all(|r| r.position().is_some());
        let mut nodes: Vec<Node> = records
            .into_iter()
            .map(|r| Node {
                id: r.id,
                name: r
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| r.id.as_str().to_string()),
                x: r.x.unwrap_or(f64::NAN),
                y: r.y.unwrap_or(f64::NAN),
            })
            .collect();
        if !all_placed {
            log::warn!(
                "loaded graph has nodes without coordinates; using circular layout for all {}",
                nodes.len()
            );
            layout::circular_layout(&mut nodes, viewport);
            report.fallback_layout = true;
        }

        for node in nodes {
            let id = node.id;
            let idx = self.graph.add_node(node);
            self.id_index.insert(id, idx);
        }

        for EdgeRecord { a, b, w } in doc.edges {
            match (self.id_index.get(&a), self.id_index.get(&b)) {
                (Some(&ia), Some(&ib)) if a != b => {
                    self.graph.add_edge(
                        ia,
                        ib,
                        Edge {
                            a,
                            b,
                            w: coerce_weight(w),
                        },
                    );
                }
                _ => {
                    log::warn!("dropping malformed edge {a} - {b}");
                    report.dropped_edges += 1;
                }
            }
        }

        let max_run = self.nodes().filter_map(|n| n.id.numeric_run()).max();
        self.next_seq = match max_run {
            Some(m) => m.saturating_add(1),
            None => self.node_count() as u64 + 1,
        };

        self.capture_snapshot();
        report.nodes = self.node_count();
        report.edges = self.edge_count();
        log::debug!("loaded graph: {report:?}");
        report
    }

    /// Export the current graph as a document (for saving).
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes().map(NodeRecord::from).collect(),
            edges: self.edges().map(EdgeRecord::from).collect(),
        }
    }

    // ─── Original-coordinates snapshot ───────────────────────────────────

    /// Remember every node's current position as its original one.
    pub fn capture_snapshot(&mut self) {
        self.original = self.nodes().map(|n| (n.id, n.position())).collect();
        self.fit_offset = Vec2::ZERO;
    }

    pub fn has_snapshot(&self) -> bool {
        !self.original.is_empty()
    }

    pub fn original_position(&self, id: NodeId) -> Option<Point> {
        self.original.get(&id).copied()
    }

    /// Move every node back to its snapshot position. Nodes added after
    /// the snapshot were recorded in the snapshot frame when placed.
    pub(crate) fn restore_snapshot(&mut self) {
        for node in self.graph.node_weights_mut() {
            let p = match self.original.get(&node.id) {
                Some(p) => *p,
                None => node.position() - self.fit_offset,
            };
            node.x = p.x;
            node.y = p.y;
        }
        self.fit_offset = Vec2::ZERO;
    }

    /// Shift every node by `(dx, dy)`.
    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        for node in self.graph.node_weights_mut() {
            node.x += dx;
            node.y += dy;
        }
        self.fit_offset += Vec2::new(dx, dy);
    }
}
