//! Errors raised by transports. Orchestrators log and swallow them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The body wasn't the JSON we expected.
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The backend couldn't be set up from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
