pub mod adapter;
pub mod client;
pub mod extractor;
pub mod http;
pub mod interface;

pub use adapter::{timed_get, CallResult, OutcomeStatus, RequestTimeout, DEFAULT_TIMEOUT_MS};
pub use client::{CannedData, UpstreamClient};
pub use extractor::{canned_and_extract, check_and_extract, fetch_and_extract, Extractor};
pub use http::ReqwestTransport;
pub use interface::{RawResponse, Transport, TransportError};

#[cfg(test)]
pub(crate) mod testing;
