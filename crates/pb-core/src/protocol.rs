//! Wire types shared with the external solver and the graph store.
//!
//! All bodies are JSON with camelCase keys. Decoding is lenient about
//! numbers (stored graphs have been seen with string weights and `null`
//! coordinates); the model decides what to do with missing values.

use crate::id::{NodeId, numeric_run};
use crate::model::{Edge, EdgeRef, Node};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

// ─── Graph documents ─────────────────────────────────────────────────────

/// A node as stored or transmitted. Coordinates may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub y: Option<f64>,
}

impl NodeRecord {
    /// Both coordinates, if both are present and finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            name: Some(node.name.clone()),
            x: Some(node.x),
            y: Some(node.y),
        }
    }
}

/// An undirected weighted edge as stored or transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub a: NodeId,
    pub b: NodeId,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub w: f64,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            a: edge.a,
            b: edge.b,
            w: edge.w,
        }
    }
}

/// A full graph: the load response and the body of a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Name a graph is saved under when the user leaves it blank.
pub const DEFAULT_GRAPH_NAME: &str = "Custom Graph";

/// Save request: a document under a user-supplied name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    #[serde(flatten)]
    pub graph: GraphDocument,
}

impl SaveRequest {
    /// Trims `name`; a blank one becomes `DEFAULT_GRAPH_NAME`.
    pub fn new(name: &str, graph: GraphDocument) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_GRAPH_NAME.to_string(),
            n => n.to_string(),
        };
        Self { name, graph }
    }
}

/// Identifier of a stored graph. Stores use integer keys, but strings are
/// accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphKey(pub String);

impl fmt::Display for GraphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GraphKey {
    fn from(s: &str) -> Self {
        GraphKey(s.to_string())
    }
}

impl Serialize for GraphKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GraphKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => Ok(GraphKey(s)),
            Value::Number(n) => Ok(GraphKey(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "graph id must be a string or number, got {other}"
            ))),
        }
    }
}

/// One entry of the stored-graph listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub id: GraphKey,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ─── Shortest-path query ─────────────────────────────────────────────────

/// Request sent to the external solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeRecord>,
    pub start_id: NodeId,
    pub end_id: NodeId,
}

/// Solver response. Missing fields decode as empty; `total: None` means
/// the end is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    #[serde(default)]
    pub path: Vec<NodeId>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub edge_path: Vec<EdgeRef>,
    #[serde(default)]
    pub iterations: Vec<IterationRow>,
}

impl PathResult {
    /// The "no route" result used whenever the solver can't be reached.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_route(&self) -> bool {
        self.total.is_some()
    }
}

/// Column holding the iteration number.
pub const ITERATION_COLUMN: &str = "Iteration";
/// Column naming the node settled in that iteration.
pub const PROCESSED_COLUMN: &str = "Processed";

/// One snapshot of the solver's progress: the iteration number, the node it
/// processed, and one column per node with the best known distance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IterationRow(pub Map<String, Value>);

impl IterationRow {
    pub fn iteration(&self) -> Option<&Value> {
        self.0.get(ITERATION_COLUMN)
    }

    pub fn processed(&self) -> Option<&Value> {
        self.0.get(PROCESSED_COLUMN)
    }

    /// Node columns (everything but the two fixed ones).
    pub fn node_columns(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| *k != ITERATION_COLUMN && *k != PROCESSED_COLUMN)
    }

    /// Display text of a cell; `-` when absent or null.
    pub fn cell(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => "-".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Orders node columns by their numeric run, then lexically.
pub fn compare_columns(a: &str, b: &str) -> std::cmp::Ordering {
    let na = numeric_run(a).unwrap_or(0);
    let nb = numeric_run(b).unwrap_or(0);
    na.cmp(&nb).then_with(|| a.cmp(b))
}

// ─── Lenient number decoding ─────────────────────────────────────────────

fn nan() -> f64 {
    f64::NAN
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).unwrap_or(f64::NAN))
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_uses_camel_case_keys() {
        let query = PathQuery {
            nodes: vec![NodeId::intern("1"), NodeId::intern("2")],
            edges: vec![EdgeRecord {
                a: NodeId::intern("1"),
                b: NodeId::intern("2"),
                w: 5.0,
            }],
            start_id: NodeId::intern("1"),
            end_id: NodeId::intern("2"),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": ["1", "2"],
                "edges": [{ "a": "1", "b": "2", "w": 5.0 }],
                "startId": "1",
                "endId": "2",
            })
        );
    }

    #[test]
    fn result_fields_default_when_missing() {
        let result: PathResult = serde_json::from_str(r#"{ "total": null }"#).unwrap();
        assert_eq!(result, PathResult::empty());
        assert!(!result.has_route());
    }

    #[test]
    fn result_decodes_edge_path_and_iterations() {
        let result: PathResult = serde_json::from_str(
            r#"{
                "path": ["1", "2"],
                "total": 5,
                "edgePath": [{ "a": "1", "b": "2" }],
                "iterations": [{ "Iteration": 0, "Processed": "start", "N1": "0 (-)" }]
            }"#,
        )
        .unwrap();
        assert_eq!(result.total, Some(5.0));
        assert_eq!(result.edge_path.len(), 1);
        let row = &result.iterations[0];
        assert_eq!(row.cell(ITERATION_COLUMN), "0");
        assert_eq!(row.cell(PROCESSED_COLUMN), "start");
        assert_eq!(row.cell("N1"), "0 (-)");
        assert_eq!(row.cell("N9"), "-");
        assert_eq!(row.node_columns().collect::<Vec<_>>(), vec!["N1"]);
    }

    #[test]
    fn lenient_numbers_in_documents() {
        let doc: GraphDocument = serde_json::from_str(
            r#"{
                "nodes": [
                    { "id": 1, "name": "A", "x": "12.5", "y": null },
                    { "id": "2" }
                ],
                "edges": [{ "a": 1, "b": "2", "w": "40" }, { "a": "1", "b": "2" }]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.nodes[0].x, Some(12.5));
        assert_eq!(doc.nodes[0].y, None);
        assert_eq!(doc.nodes[0].position(), None);
        assert_eq!(doc.nodes[1].name, None);
        assert_eq!(doc.edges[0].w, 40.0);
        assert!(doc.edges[1].w.is_nan());
    }

    #[test]
    fn graph_keys_accept_numbers() {
        let list: Vec<GraphSummary> = serde_json::from_str(
            r#"[{ "id": 3, "name": "Campus", "createdAt": "2024-05-01 10:00:00" }, { "id": "x", "name": "Draft" }]"#,
        )
        .unwrap();
        assert_eq!(list[0].id, GraphKey("3".into()));
        assert_eq!(list[1].created_at, None);
    }

    #[test]
    fn save_request_flattens_graph() {
        let req = SaveRequest {
            name: "Campus".into(),
            graph: GraphDocument::default(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Campus", "nodes": [], "edges": [] })
        );
    }

    #[test]
    fn blank_save_name_gets_default() {
        assert_eq!(SaveRequest::new("  ", GraphDocument::default()).name, "Custom Graph");
        assert_eq!(SaveRequest::new(" Campus ", GraphDocument::default()).name, "Campus");
    }

    #[test]
    fn columns_sort_numerically_first() {
        let mut cols = vec!["N10", "N2", "gate", "N1"];
        cols.sort_by(|a, b| compare_columns(a, b));
        assert_eq!(cols, vec!["gate", "N1", "N2", "N10"]);
    }
}
