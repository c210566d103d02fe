//! Auto-fit and fallback layout.
//!
//! `auto_fit` translates the graph so its bounding box sits a fixed margin
//! from the origin and sizes the canvas bitmap to hold it. It always starts
//! from the load-time snapshot, so repeated fits never compound.
//! `circular_layout` places nodes on a ring when a loaded graph carries no
//! usable coordinates.

use crate::model::{GraphModel, Node};
use kurbo::{Point, Rect};
use std::f64::consts::TAU;

/// Gap kept between the graph's bounding box and the canvas edge.
pub const FIT_MARGIN: f64 = 40.0;

/// The canvas never gets shorter than this.
pub const MIN_CANVAS_HEIGHT: u32 = 520;

/// On-screen size of the container the canvas lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: MIN_CANVAS_HEIGHT as f64,
        }
    }
}

/// Drawing-buffer size of the canvas, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Canvas matching the container's width at the minimum height.
    pub fn fit_container(viewport: Viewport) -> Self {
        Self {
            width: (viewport.width.floor() as u32).max(1),
            height: MIN_CANVAS_HEIGHT,
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::fit_container(Viewport::default())
    }
}

/// Smallest rectangle containing every node position, or `None` when empty.
pub fn bounding_box<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Option<Rect> {
    nodes
        .into_iter()
        .map(|n| Rect::from_points(n.position(), n.position()))
        .reduce(|acc, r| acc.union(r))
}

/// Translate all nodes so the graph starts `FIT_MARGIN` from the origin and
/// return the canvas size needed to show it.
///
/// Restores the original-coordinates snapshot first, so calling this twice
/// yields the same positions as calling it once.
pub fn auto_fit(model: &mut GraphModel, viewport: Viewport) -> CanvasSize {
    if model.is_empty() {
        return CanvasSize::fit_container(viewport);
    }
    if model.has_snapshot() {
        model.restore_snapshot();
    }
    let Some(bbox) = bounding_box(model.nodes()) else {
        return CanvasSize::fit_container(viewport);
    };

    let needed_w = (bbox.width() + FIT_MARGIN * 2.0).ceil();
    let needed_h = (bbox.height() + FIT_MARGIN * 2.0).ceil();
    let dx = FIT_MARGIN - bbox.x0;
    let dy = FIT_MARGIN - bbox.y0;
    model.translate(dx, dy);

    let size = CanvasSize {
        width: (viewport.width.floor() as u32).max(needed_w as u32).max(1),
        height: MIN_CANVAS_HEIGHT.max(needed_h as u32),
    };
    log::debug!("auto-fit: shift ({dx}, {dy}), canvas {}x{}", size.width, size.height);
    size
}

/// Place `nodes` evenly on a circle centred horizontally in the container,
/// half-way down the minimum canvas height.
///
/// The radius grows with the container and with the node count so large
/// graphs don't crowd.
pub fn circular_layout(nodes: &mut [Node], viewport: Viewport) {
    if nodes.is_empty() {
        return;
    }
    let center = Point::new(
        (viewport.width / 2.0).floor().max(220.0),
        (MIN_CANVAS_HEIGHT / 2) as f64,
    );
    let count = nodes.len() as f64;
    let radius = (center.x.min(center.y) - 60.0).max(140.0) + count * 2.0;
    let step = TAU / count;
    for (i, node) in nodes.iter_mut().enumerate() {
        let angle = i as f64 * step;
        node.x = center.x + angle.cos() * radius;
        node.y = center.y + angle.sin() * radius;
    }
}
