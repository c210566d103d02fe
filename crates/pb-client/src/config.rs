use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Where the solver and the graph store live.
///
/// `Default` reads `PATHBOARD_API_URL` and `PATHBOARD_TIMEOUT_SECS` from the
/// environment. Without a timeout variable requests may wait forever.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub solve_path: String,
    pub list_path: String,
    /// Asks the store to create its built-in graph.
    pub seed_path: String,
    pub load_path: String,
    pub save_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("PATHBOARD_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: std::env::var("PATHBOARD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            solve_path: "/api/shortest-path".to_string(),
            list_path: "/api/graphs".to_string(),
            seed_path: "/api/graphs/seed".to_string(),
            load_path: "/api/graphs/load".to_string(),
            save_path: "/api/graphs/save".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
