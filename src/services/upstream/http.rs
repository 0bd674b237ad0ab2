use reqwest::Client;
use url::Url;

use super::interface::{RawResponse, Transport, TransportError};

/// `Transport` backed by a shared `reqwest::Client`.
///
/// The client has no timeout of its own; the adapter enforces it.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

// The URL carries credentials, strip it before the error goes anywhere.
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::TimedOut;
    }
    let is_connect = err.is_connect();
    let err = err.without_url();
    if is_connect {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}
