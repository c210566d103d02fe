pub mod id;
pub mod layout;
pub mod model;
pub mod protocol;

pub use id::NodeId;
pub use layout::{CanvasSize, Viewport, auto_fit, circular_layout};
pub use model::*;
pub use protocol::{
    EdgeRecord, GraphDocument, GraphKey, GraphSummary, IterationRow, NodeRecord, PathQuery,
    PathResult, SaveRequest,
};
