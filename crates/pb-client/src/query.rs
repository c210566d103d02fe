use crate::transport::SolverTransport;
use pb_core::protocol::{PathQuery, PathResult};

/// Sends path queries and turns every failure into the empty "no route"
/// result.
///
/// Holds no editor state: callers build the query, await `run`, then apply
/// the result. Concurrent queries are not de-duplicated; whichever result the
/// caller applies last wins.
#[derive(Debug, Clone)]
pub struct PathQueryClient<T> {
    transport: T,
}

impl<T: SolverTransport> PathQueryClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn run(&self, query: &PathQuery) -> PathResult {
        match self.transport.solve(query).await {
            Ok(result) => {
                log::debug!(
                    "solver: {} -> {}: total {:?}, {} iterations",
                    query.start_id,
                    query.end_id,
                    result.total,
                    result.iterations.len()
                );
                result
            }
            Err(e) => {
                log::error!("path query {} -> {} failed: {e}", query.start_id, query.end_id);
                PathResult::empty()
            }
        }
    }
}
