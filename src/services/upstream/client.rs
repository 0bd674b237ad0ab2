use std::path::{Path, PathBuf};

use url::Url;

use super::{adapter::RequestTimeout, http::ReqwestTransport, interface::Transport};
use crate::{
    config::{Config, RunEnv, UpstreamEndpoints},
    logger::sensitive,
};

/// Everything a call site needs to reach the upstream APIs.
#[derive(Debug, Clone)]
pub struct UpstreamClient<T = ReqwestTransport> {
    transport: T,
    endpoints: UpstreamEndpoints,
    timeout: RequestTimeout,
    run_env: RunEnv,
}

impl UpstreamClient<ReqwestTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ReqwestTransport::default(),
            config.endpoints.clone(),
            config.timeout,
            config.run_env,
        )
    }
}

impl<T: Transport> UpstreamClient<T> {
    pub fn new(
        transport: T,
        endpoints: UpstreamEndpoints,
        timeout: RequestTimeout,
        run_env: RunEnv,
    ) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
            run_env,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &UpstreamEndpoints {
        &self.endpoints
    }

    /// The per-call override when given, the configured timeout otherwise.
    pub fn timeout_or_default(&self, timeout: Option<RequestTimeout>) -> RequestTimeout {
        timeout.unwrap_or(self.timeout)
    }

    /// Request URL as it may appear in logs.
    pub fn loggable_url(&self, url: &Url, credential: &str) -> String {
        sensitive(url.as_str(), &[credential], self.run_env)
    }
}

/// Directory holding the canned upstream responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedData {
    dir: PathBuf,
}

impl CannedData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}
