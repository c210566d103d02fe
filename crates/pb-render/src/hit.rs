//! Hit testing: point → nearest node.

use kurbo::Point;
use pb_core::id::NodeId;
use pb_core::model::GraphModel;

/// How far from a node's centre a click still selects it.
pub const DETECT_RADIUS: f64 = 24.0;

/// Find the node nearest to `point` within `DETECT_RADIUS`.
/// Returns `None` if no node is close enough.
pub fn hit_test(model: &GraphModel, point: Point) -> Option<NodeId> {
    hit_test_within(model, point, DETECT_RADIUS)
}

/// Nearest node within `radius`. Strictly closer wins, so on an exact tie
/// the node inserted first is returned.
pub fn hit_test_within(model: &GraphModel, point: Point, radius: f64) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for node in model.nodes() {
        if !node.has_finite_position() {
            continue;
        }
        let d = node.position().distance(point);
        if d > radius {
            continue;
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id)
}
