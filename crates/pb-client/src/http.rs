//! `reqwest`-based backend for both transports.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{GraphStore, SolverTransport};
use pb_core::protocol::{GraphDocument, GraphKey, GraphSummary, PathQuery, PathResult, SaveRequest};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send, require a success status, hand back the response.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::decode(url, e))
    }
}

impl SolverTransport for HttpBackend {
    async fn solve(&self, query: &PathQuery) -> Result<PathResult> {
        let url = self.config.endpoint(&self.config.solve_path);
        log::debug!("POST {url} ({} -> {})", query.start_id, query.end_id);
        let response = self.send(self.client.post(&url).json(query), &url).await?;
        Self::json(response, &url).await
    }
}

impl GraphStore for HttpBackend {
    async fn list(&self) -> Result<Vec<GraphSummary>> {
        let url = self.config.endpoint(&self.config.list_path);
        log::debug!("GET {url}");
        let response = self.send(self.client.get(&url), &url).await?;
        Self::json(response, &url).await
    }

    async fn seed(&self) -> Result<()> {
        let url = self.config.endpoint(&self.config.seed_path);
        log::debug!("GET {url}");
        self.send(self.client.get(&url), &url).await?;
        Ok(())
    }

    async fn load(&self, id: &GraphKey) -> Result<GraphDocument> {
        let url = self.config.endpoint(&self.config.load_path);
        log::debug!("GET {url}?id={id}");
        let request = self.client.get(&url).query(&[("id", id.0.as_str())]);
        let response = self.send(request, &url).await?;
        Self::json(response, &url).await
    }

    async fn save(&self, request: &SaveRequest) -> Result<()> {
        let url = self.config.endpoint(&self.config.save_path);
        log::debug!("POST {url} ({:?})", request.name);
        self.send(self.client.post(&url).json(request), &url).await?;
        Ok(())
    }
}
