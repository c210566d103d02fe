//! Input abstraction layer.
//!
//! Maps pointer positions reported in screen space onto the canvas's logical
//! (drawing-buffer) coordinates. The canvas may be CSS-scaled relative to its
//! bitmap, so each axis gets its own scale factor.

use kurbo::Point;
use pb_core::layout::CanvasSize;

/// A pointer click in screen (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// The canvas's on-screen bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Convert a pointer event into canvas logical coordinates.
///
/// Scale is `bitmap / display` per axis; a degenerate display size maps
/// 1:1 instead of dividing by zero.
pub fn map_to_canvas(event: &PointerEvent, rect: &ScreenRect, bitmap: CanvasSize) -> Point {
    let scale = |bitmap_len: u32, display_len: f64| {
        if display_len > 0.0 && display_len.is_finite() {
            bitmap_len as f64 / display_len
        } else {
            1.0
        }
    };
    let sx = scale(bitmap.width, rect.width);
    let sy = scale(bitmap.height, rect.height);
    Point::new(
        (event.client_x - rect.left) * sx,
        (event.client_y - rect.top) * sy,
    )
}
