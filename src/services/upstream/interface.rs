use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// What came back from an upstream before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport-level failures. Messages never include the request URL.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Sends GET requests to an upstream.
pub trait Transport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}
