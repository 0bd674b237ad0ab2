//! Test doubles for the upstream transport.

use std::{cell::RefCell, time::Duration};

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use super::{
    adapter::RequestTimeout,
    client::UpstreamClient,
    interface::{RawResponse, Transport, TransportError},
};
use crate::config::{RunEnv, UpstreamEndpoints};

enum Reply {
    Respond(RawResponse),
    Refuse,
}

/// Answers every request with the same reply, optionally after a delay.
pub struct StubTransport {
    delay: Duration,
    reply: Reply,
    requested: RefCell<Vec<Url>>,
}

impl StubTransport {
    pub fn json(status: u16, body: Value) -> Self {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        Self {
            delay: Duration::ZERO,
            reply: Reply::Respond(RawResponse::new(status, body.as_bytes().to_vec())),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn refusing() -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Reply::Refuse,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn delayed(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn last_url(&self) -> Option<Url> {
        self.requested.borrow().last().cloned()
    }
}

impl Transport for StubTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        self.requested.borrow_mut().push(url.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Refuse => Err(TransportError::Connection("connection refused".to_string())),
        }
    }
}

pub fn stub_client(transport: StubTransport) -> UpstreamClient<StubTransport> {
    UpstreamClient::new(
        transport,
        UpstreamEndpoints::default(),
        RequestTimeout::default(),
        RunEnv::Test,
    )
}

pub fn timeout_ms(ms: u64) -> Option<RequestTimeout> {
    Some(RequestTimeout::from_millis(ms).expect("positive timeout"))
}
