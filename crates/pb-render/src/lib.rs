pub mod hit;
pub mod paint;
pub mod surface;
pub mod svg;
pub mod theme;

pub use hit::{DETECT_RADIUS, hit_test};
pub use paint::{Scene, paint_graph};
pub use surface::{DrawCommand, DrawSurface, Font, Glow, RecordingSurface, Stroke};
pub use svg::{SvgSurface, render_svg};
pub use theme::Theme;
