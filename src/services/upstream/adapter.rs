//! Bounded external calls.
//!
//! `timed_get` issues one GET against an upstream and races it against a timer. Whichever
//! finishes first decides the outcome; when the timer wins the in-flight request future is
//! dropped, which cancels it, so a late response can never be observed.

use std::{num::NonZeroU64, time::Duration};

use actix_web::http::StatusCode as HttpStatus;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use super::interface::{Transport, TransportError};

/// Default timeout (in milliseconds) for upstream calls.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

const DEFAULT_TIMEOUT: NonZeroU64 = match NonZeroU64::new(DEFAULT_TIMEOUT_MS) {
    Some(ms) => ms,
    None => panic!("default timeout must be positive"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timeout must be a positive number of milliseconds")]
pub struct InvalidTimeout;

/// Upper bound on how long one upstream call may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeout(NonZeroU64);

impl RequestTimeout {
    pub fn from_millis(ms: u64) -> Result<Self, InvalidTimeout> {
        NonZeroU64::new(ms).map(Self).ok_or(InvalidTimeout)
    }

    pub fn as_millis(&self) -> u64 {
        self.0.get()
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0.get())
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT)
    }
}

/// How a single upstream call ended. Exactly one case holds.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    /// 2xx, whatever the body looks like.
    Success { status: StatusCode },
    /// Non-2xx, or a transport failure other than the timeout.
    UpstreamError {
        status: Option<StatusCode>,
        message: String,
    },
    Timeout { message: String },
}

/// Result of one call to `timed_get`.
///
/// `body` is whatever JSON the upstream sent back, if any. A body that does not parse is `None`;
/// the caller decides whether that matters.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub outcome: OutcomeStatus,
    pub body: Option<Value>,
    pub elapsed: Duration,
}

impl CallResult {
    /// Raw HTTP status, absent when no response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match &self.outcome {
            OutcomeStatus::Success { status } => Some(*status),
            OutcomeStatus::UpstreamError { status, .. } => *status,
            OutcomeStatus::Timeout { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, OutcomeStatus::Success { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.outcome, OutcomeStatus::Timeout { .. })
    }

    /// Status to send back to our own client when the call did not succeed.
    ///
    /// A timeout may be worth retrying (503); everything else is a generic 500 so that upstream
    /// details do not leak.
    pub fn failure_status(&self) -> Option<HttpStatus> {
        match self.outcome {
            OutcomeStatus::Success { .. } => None,
            OutcomeStatus::Timeout { .. } => Some(HttpStatus::SERVICE_UNAVAILABLE),
            OutcomeStatus::UpstreamError { .. } => Some(HttpStatus::INTERNAL_SERVER_ERROR),
        }
    }

    /// The parsed body of a successful call.
    pub fn into_body(self) -> Option<Value> {
        match self.outcome {
            OutcomeStatus::Success { .. } => self.body,
            _ => None,
        }
    }
}

/// Sends a GET request with a strict timeout and classifies what happened.
///
/// Never fails: every outcome, including a timeout, is folded into the `CallResult`.
pub async fn timed_get<T: Transport>(
    transport: &T,
    url: &Url,
    timeout: RequestTimeout,
) -> CallResult {
    let started = Instant::now();

    let (outcome, body) =
        match tokio::time::timeout(timeout.as_duration(), transport.get(url)).await {
            Err(_elapsed) => (timeout_outcome(timeout), None),
            Ok(Err(TransportError::TimedOut)) => (timeout_outcome(timeout), None),
            Ok(Err(err)) => (
                OutcomeStatus::UpstreamError {
                    status: None,
                    message: err.to_string(),
                },
                None,
            ),
            Ok(Ok(response)) => (
                classify_status(response.status),
                // An unparsable body is just absent.
                serde_json::from_slice::<Value>(&response.body).ok(),
            ),
        };

    CallResult {
        outcome,
        body,
        elapsed: started.elapsed(),
    }
}

fn timeout_outcome(timeout: RequestTimeout) -> OutcomeStatus {
    OutcomeStatus::Timeout {
        message: format!("timeout {} (ms)", timeout.as_millis()),
    }
}

fn classify_status(status: StatusCode) -> OutcomeStatus {
    if status.is_success() {
        OutcomeStatus::Success { status }
    } else {
        OutcomeStatus::UpstreamError {
            status: Some(status),
            message: format!("upstream responded with {}", status),
        }
    }
}
