pub mod editor;
pub mod input;
pub mod report;
pub mod tools;

pub use editor::{ClickOutcome, Editor};
pub use input::{PointerEvent, ScreenRect, map_to_canvas};
pub use report::{EdgeRow, IterationTable, NodeRow, RouteReport};
pub use tools::{InputProvider, Mode, ToolAction, ToolState, parse_weight};
