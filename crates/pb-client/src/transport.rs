//! Capabilities the orchestrators need from the outside world.
//!
//! The HTTP backend implements both; tests plug in in-process stubs.

use crate::error::Result;
use pb_core::protocol::{GraphDocument, GraphKey, GraphSummary, PathQuery, PathResult, SaveRequest};

/// Something that can answer a shortest-path query.
#[allow(async_fn_in_trait)]
pub trait SolverTransport {
    async fn solve(&self, query: &PathQuery) -> Result<PathResult>;
}

/// Saved-graph storage.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    async fn list(&self) -> Result<Vec<GraphSummary>>;

    /// Ask the store to create its built-in graph (used when the listing is
    /// empty).
    async fn seed(&self) -> Result<()>;

    async fn load(&self, id: &GraphKey) -> Result<GraphDocument>;

    async fn save(&self, request: &SaveRequest) -> Result<()>;
}
