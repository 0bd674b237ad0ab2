use std::{env, fmt, path::PathBuf};

use thiserror::Error;
use url::Url;

use crate::services::{
    destination_service::GEONAMES_SEARCH_API_BASE_URL,
    picture_service::PIXABAY_API_BASE_URL,
    upstream::RequestTimeout,
    weather_service::{WEATHERBIT_CURRENT_BASE_URL, WEATHERBIT_FORECAST_BASE_URL},
};

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable(s) not set or empty: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid UPSTREAM_TIMEOUT_MS: {0}")]
    InvalidTimeout(String),

    #[error("invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Value of `RUST_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunEnv {
    #[default]
    Development,
    Test,
    Production,
}

impl RunEnv {
    /// Unknown values fall back to development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => RunEnv::Production,
            Some("test") => RunEnv::Test,
            _ => RunEnv::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(env::var("RUST_ENV").ok().as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunEnv::Development => "development",
            RunEnv::Test => "test",
            RunEnv::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RunEnv::Production)
    }
}

impl fmt::Display for RunEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub geonames_username: String,
    pub weatherbit_api_key: String,
    pub pixabay_api_key: String,
}

impl Credentials {
    /// Pairs (environment variable, value).
    pub fn named(&self) -> [(&'static str, &str); 3] {
        [
            ("GEONAMES_USERNAME", self.geonames_username.as_str()),
            ("WEATHERBIT_API_KEY", self.weatherbit_api_key.as_str()),
            ("PIXABAY_API_KEY", self.pixabay_api_key.as_str()),
        ]
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

// Never print the secrets themselves.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("geonames_username", &"redacted")
            .field("weatherbit_api_key", &"redacted")
            .field("pixabay_api_key", &"redacted")
            .finish()
    }
}

/// Base URLs of the upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    pub geonames: Url,
    pub weatherbit_current: Url,
    pub weatherbit_forecast: Url,
    pub pixabay: Url,
}

impl UpstreamEndpoints {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            geonames: url_or_default(lookup, "GEONAMES_BASE_URL", GEONAMES_SEARCH_API_BASE_URL)?,
            weatherbit_current: url_or_default(
                lookup,
                "WEATHERBIT_CURRENT_URL",
                WEATHERBIT_CURRENT_BASE_URL,
            )?,
            weatherbit_forecast: url_or_default(
                lookup,
                "WEATHERBIT_FORECAST_URL",
                WEATHERBIT_FORECAST_BASE_URL,
            )?,
            pixabay: url_or_default(lookup, "PIXABAY_BASE_URL", PIXABAY_API_BASE_URL)?,
        })
    }
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self::from_lookup(&|_: &str| None).expect("built-in upstream URLs are valid")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub run_env: RunEnv,
    pub credentials: Credentials,
    pub endpoints: UpstreamEndpoints,
    pub timeout: RequestTimeout,
    pub canned_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let credentials = Credentials {
            geonames_username: non_empty("GEONAMES_USERNAME").unwrap_or_default(),
            weatherbit_api_key: non_empty("WEATHERBIT_API_KEY").unwrap_or_default(),
            pixabay_api_key: non_empty("PIXABAY_API_KEY").unwrap_or_default(),
        };
        let missing = credentials.missing();
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let port = match non_empty("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
            None => PORT,
        };

        let timeout = match non_empty("UPSTREAM_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .and_then(|ms| RequestTimeout::from_millis(ms).ok())
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => RequestTimeout::default(),
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            run_env: RunEnv::parse(lookup("RUST_ENV").as_deref()),
            credentials,
            endpoints: UpstreamEndpoints::from_lookup(&lookup)?,
            timeout,
            canned_dir: non_empty("CANNED_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_canned_dir),
        })
    }
}

pub fn default_canned_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("canned")
}

fn url_or_default<F>(lookup: &F, name: &'static str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}
