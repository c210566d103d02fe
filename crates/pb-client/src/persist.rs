//! Saving, listing and loading graphs.

use crate::transport::GraphStore;
use pb_core::protocol::{GraphDocument, GraphKey, GraphSummary, SaveRequest};

/// Name used when a graph is saved without one.
pub use pb_core::protocol::DEFAULT_GRAPH_NAME;

/// Best-effort wrapper around a `GraphStore` that also caches the latest
/// listing.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
    graphs: Vec<GraphSummary>,
}

impl<S: GraphStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            graphs: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The listing from the last `list` (or successful `save`).
    pub fn graphs(&self) -> &[GraphSummary] {
        &self.graphs
    }

    /// Refresh the listing. An empty store is seeded once and listed again.
    /// Failures leave an empty listing.
    pub async fn list(&mut self) -> &[GraphSummary] {
        let mut graphs = self.fetch_list().await;
        if graphs.is_empty() {
            log::info!("graph store is empty, requesting seed graph");
            match self.store.seed().await {
                Ok(()) => graphs = self.fetch_list().await,
                Err(e) => log::error!("seeding graph store failed: {e}"),
            }
        }
        self.graphs = graphs;
        &self.graphs
    }

    async fn fetch_list(&self) -> Vec<GraphSummary> {
        self.store.list().await.unwrap_or_else(|e| {
            log::error!("listing graphs failed: {e}");
            Vec::new()
        })
    }

    /// Fetch a stored graph. `None` on any failure.
    pub async fn load(&self, id: &GraphKey) -> Option<GraphDocument> {
        match self.store.load(id).await {
            Ok(doc) => {
                log::debug!(
                    "loaded graph {id}: {} nodes, {} edges",
                    doc.nodes.len(),
                    doc.edges.len()
                );
                Some(doc)
            }
            Err(e) => {
                log::error!("loading graph {id} failed: {e}");
                None
            }
        }
    }

    /// Save `graph` under `name` and refresh the listing on success.
    pub async fn save(&mut self, name: &str, graph: GraphDocument) -> bool {
        let request = SaveRequest::new(name, graph);
        match self.store.save(&request).await {
            Ok(()) => {
                log::info!("saved graph {:?}", request.name);
                self.list().await;
                true
            }
            Err(e) => {
                log::error!("saving graph {:?} failed: {e}", request.name);
                false
            }
        }
    }
}
