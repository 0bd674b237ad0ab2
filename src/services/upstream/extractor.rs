use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::{
    adapter::{timed_get, OutcomeStatus, RequestTimeout},
    interface::Transport,
};
use crate::models::api::NormalizedResult;

/// Turns one upstream's JSON into a domain object.
///
/// Live and canned lookups both go through `check_and_extract`, so fixtures exercise the same
/// code as real responses.
pub trait Extractor {
    /// Upstream payload shape.
    type Response: DeserializeOwned;
    /// Domain object handed to the client.
    type Output: Serialize;

    /// Used in logs.
    const API_NAME: &'static str;
    const NOT_FOUND_MESSAGE: &'static str;

    /// Whether the upstream reported no results.
    fn is_empty(response: &Self::Response) -> bool;

    /// Picks one record and reshapes it. Only called on non-empty responses.
    fn extract(response: Self::Response) -> Option<Self::Output>;
}

#[derive(Debug, Error)]
pub enum CannedDataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Checks the data sent back by an upstream and returns a suitable result.
///
/// Fails only when the body does not match the upstream's shape.
pub fn check_and_extract<E: Extractor>(
    body: Value,
) -> Result<NormalizedResult<E::Output>, serde_json::Error> {
    let response: E::Response = serde_json::from_value(body)?;

    if E::is_empty(&response) {
        return Ok(NormalizedResult::not_found(E::NOT_FOUND_MESSAGE));
    }

    Ok(match E::extract(response) {
        Some(output) => NormalizedResult::ok(output),
        None => NormalizedResult::not_found(E::NOT_FOUND_MESSAGE),
    })
}

/// One bounded call to an upstream followed by extraction.
///
/// Timeouts map to 503, every other failure to 500 with `failure_message`, which must not contain
/// credentials. A 2xx without a JSON body counts as a failure.
pub async fn fetch_and_extract<E: Extractor, T: Transport>(
    transport: &T,
    url: &Url,
    timeout: RequestTimeout,
    failure_message: &str,
) -> NormalizedResult<E::Output> {
    let result = timed_get(transport, url, timeout).await;
    log::info!(
        "got response from the {} API: status={:?}, elapsed={:?}",
        E::API_NAME,
        result.status(),
        result.elapsed
    );

    if let Some(status) = result.failure_status() {
        match &result.outcome {
            OutcomeStatus::Timeout { message } | OutcomeStatus::UpstreamError { message, .. } => {
                log::error!("{} API call failed: {}", E::API_NAME, message)
            }
            OutcomeStatus::Success { .. } => {}
        }
        return NormalizedResult::error(status, failure_message);
    }

    match result.into_body() {
        Some(body) => extract_or_internal_error::<E>(body, failure_message),
        None => {
            log::error!("{} API response body is not valid JSON", E::API_NAME);
            NormalizedResult::internal_error(failure_message)
        }
    }
}

/// Feeds a fixture file through the same extractor as the live path.
pub fn canned_and_extract<E: Extractor>(
    path: &Path,
    failure_message: &str,
) -> NormalizedResult<E::Output> {
    match read_canned(path) {
        Ok(body) => extract_or_internal_error::<E>(body, failure_message),
        Err(err) => {
            log::error!("{}: {}", E::API_NAME, err);
            NormalizedResult::internal_error(failure_message)
        }
    }
}

pub fn read_canned(path: &Path) -> Result<Value, CannedDataError> {
    let text = fs::read_to_string(path).map_err(|source| CannedDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CannedDataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn extract_or_internal_error<E: Extractor>(
    body: Value,
    failure_message: &str,
) -> NormalizedResult<E::Output> {
    match check_and_extract::<E>(body) {
        Ok(result) => result,
        Err(err) => {
            log::error!("unexpected {} response shape: {}", E::API_NAME, err);
            NormalizedResult::internal_error(failure_message)
        }
    }
}
