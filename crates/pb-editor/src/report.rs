//! Tabular views of the editor state and the latest solver result.

use pb_core::id::NodeId;
use pb_core::model::GraphModel;
use pb_core::protocol::{
    ITERATION_COLUMN, IterationRow, PROCESSED_COLUMN, PathResult, compare_columns,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Text shown when the solver found nothing (or couldn't be reached).
pub const NO_ROUTE: &str = "No route found";

/// Text shown in place of an empty iteration table.
pub const NO_ITERATIONS: &str = "No iteration data";

/// Summary of the latest query, with node names resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub total: Option<f64>,
    pub route: Vec<String>,
    pub iterations: IterationTable,
}

impl RouteReport {
    pub fn from_result(result: &PathResult, model: &GraphModel) -> Self {
        Self {
            total: result.total,
            route: result.path.iter().map(|&id| model.display_name(id)).collect(),
            iterations: IterationTable::from_rows(&result.iterations),
        }
    }

    pub fn has_route(&self) -> bool {
        self.total.is_some()
    }

    /// `"8 m"`, or `None` when there is no route.
    pub fn distance_text(&self) -> Option<String> {
        self.total.map(|t| format!("{t} m"))
    }

    /// Node names joined with arrows.
    pub fn route_text(&self) -> String {
        self.route.join(" → ")
    }

    /// One-line summary for a status area.
    pub fn summary(&self) -> String {
        match self.distance_text() {
            Some(distance) => format!("Distance: {distance} | Route: {}", self.route_text()),
            None => NO_ROUTE.to_string(),
        }
    }
}

/// Solver iterations laid out as a table: `Iteration`, `Processed`, then one
/// column per node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IterationTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl IterationTable {
    pub fn from_rows(rows: &[IterationRow]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let node_columns: BTreeSet<&str> = rows.iter().flat_map(|r| r.node_columns()).collect();
        let mut node_columns: Vec<&str> = node_columns.into_iter().collect();
        node_columns.sort_by(|a, b| compare_columns(a, b));

        let columns: Vec<String> = [ITERATION_COLUMN, PROCESSED_COLUMN]
            .into_iter()
            .chain(node_columns)
            .map(str::to_string)
            .collect();
        let rows = rows
            .iter()
            .map(|row| columns.iter().map(|c| row.cell(c)).collect())
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A row of the nodes table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    pub id: NodeId,
    pub name: String,
    pub x: i64,
    pub y: i64,
}

/// A row of the edges table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub w: i64,
}

/// Nodes ordered by the numeric part of their id.
pub fn node_rows(model: &GraphModel) -> Vec<NodeRow> {
    let mut rows: Vec<(u64, NodeRow)> = model
        .nodes()
        .map(|n| {
            (
                n.id.numeric_run().unwrap_or(0),
                NodeRow {
                    id: n.id,
                    name: n.name.clone(),
                    x: n.x.round() as i64,
                    y: n.y.round() as i64,
                },
            )
        })
        .collect();
    rows.sort_by_key(|(k, _)| *k);
    rows.into_iter().map(|(_, r)| r).collect()
}

/// Edges in insertion order with endpoint names.
pub fn edge_rows(model: &GraphModel) -> Vec<EdgeRow> {
    model
        .edges()
        .map(|e| EdgeRow {
            from: model.display_name(e.a),
            to: model.display_name(e.b),
            w: e.w.round() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(json: &str) -> IterationRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn iteration_columns_are_ordered() {
        let table = IterationTable::from_rows(&[
            row(r#"{ "Iteration": 0, "Processed": "init", "N10": "inf (-)", "N2": "0 (-)" }"#),
            row(r#"{ "Iteration": 1, "Processed": "N2", "N2": "0 (-)", "N1": "4 (N2)" }"#),
        ]);
        assert_eq!(table.columns, vec!["Iteration", "Processed", "N1", "N2", "N10"]);
        assert_eq!(table.rows[0], vec!["0", "init", "-", "0 (-)", "inf (-)"]);
        assert_eq!(table.rows[1], vec!["1", "N2", "4 (N2)", "0 (-)", "-"]);
    }

    #[test]
    fn empty_iterations_make_empty_table() {
        let table = IterationTable::from_rows(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn fractional_totals_keep_their_decimals() {
        let report = RouteReport {
            total: Some(12.5),
            route: vec!["A".into(), "B".into()],
            iterations: IterationTable::default(),
        };
        assert_eq!(report.summary(), "Distance: 12.5 m | Route: A → B");
    }

    #[test]
    fn no_route_summary() {
        assert_eq!(RouteReport::default().summary(), NO_ROUTE);
    }

    #[test]
    fn rows_use_names_and_rounding() {
        let mut model = GraphModel::new();
        model.add_node(0.0, 0.0, Some("Gate"));
        model.add_node(60.0, 0.0, Some("Hall"));
        model.add_edge(NodeId::intern("2"), NodeId::intern("1"), 2.6);
        assert_eq!(
            node_rows(&model).iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Gate", "Hall"]
        );
        assert_eq!(
            edge_rows(&model),
            vec![EdgeRow {
                from: "Hall".into(),
                to: "Gate".into(),
                w: 3
            }]
        );
    }
}
