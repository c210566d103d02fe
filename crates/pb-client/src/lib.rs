//! Network side of Pathboard: talking to the shortest-path solver and the
//! graph store.
//!
//! Transports (`SolverTransport`, `GraphStore`) return `Result`s. The
//! orchestrators on top of them never do: a failed call is logged and turns
//! into an empty result, so callers always get something to render.

pub mod config;
pub mod error;
pub mod http;
pub mod persist;
pub mod query;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpBackend;
pub use persist::Persistence;
pub use query::PathQueryClient;
pub use transport::{GraphStore, SolverTransport};
