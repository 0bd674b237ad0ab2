//! Destination lookup through the GeoNames Search API.
//!
//! See https://www.geonames.org/export/geonames-search.html

use serde::Deserialize;
use url::Url;

use crate::{
    models::{api::NormalizedResult, destination::Destination},
    services::upstream::{
        canned_and_extract, fetch_and_extract, CannedData, Extractor, RequestTimeout, Transport,
        UpstreamClient,
    },
};

/// Base URL of the GeoNames Search API (the plain-http host is being phased out).
pub const GEONAMES_SEARCH_API_BASE_URL: &str = "https://secure.geonames.org/searchJSON";

pub const CANNED_DESTINATION_FILE: &str = "lamboing-geonames.json";

const CANNED_FAILURE_MESSAGE: &str = "Failed to find canned destination data.";

// Water bodies, parks, populated places, spots, mountains and forests.
const FEATURE_CLASSES: [&str; 6] = ["H", "L", "P", "S", "T", "V"];

#[derive(Debug, Deserialize)]
pub struct GeoNamesResponse {
    pub geonames: Vec<GeoNamesRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoNamesRecord {
    pub lng: String,
    pub lat: String,
    pub name: String,
    #[serde(default)]
    pub country_name: String,
}

pub struct GeoNamesSearch;

impl Extractor for GeoNamesSearch {
    type Response = GeoNamesResponse;
    type Output = Destination;

    const API_NAME: &'static str = "GeoNames Search";
    const NOT_FOUND_MESSAGE: &'static str =
        "No destination found. Please check your spelling and try again.";

    fn is_empty(response: &GeoNamesResponse) -> bool {
        response.geonames.is_empty()
    }

    fn extract(response: GeoNamesResponse) -> Option<Destination> {
        response
            .geonames
            .into_iter()
            .next()
            .map(|record| Destination {
                lon: record.lng,
                lat: record.lat,
                name: record.name,
                country_name: record.country_name,
            })
    }
}

pub fn make_url(base: &Url, query: &str, username: &str, max_rows: u32) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .clear()
            .append_pair("username", username)
            .append_pair("q", query)
            .append_pair("maxRows", &max_rows.to_string());
        for feature_class in FEATURE_CLASSES {
            pairs.append_pair("featureClass", feature_class);
        }
        pairs
            .append_pair("lang", "en")
            .append_pair("type", "json")
            .append_pair("fuzzy", "0.9");
    }
    url
}

/// Finds the destination best matching `query`.
pub async fn get_destination<T: Transport>(
    client: &UpstreamClient<T>,
    query: &str,
    username: &str,
    timeout: Option<RequestTimeout>,
) -> NormalizedResult<Destination> {
    let failure_message = format!("Failed to find destination for query '{}'.", query);

    // We take the first result anyway.
    let url = make_url(&client.endpoints().geonames, query, username, 1);
    log::info!(
        "built request URL: fn=get_destination, url={}",
        client.loggable_url(&url, username)
    );

    fetch_and_extract::<GeoNamesSearch, T>(
        client.transport(),
        &url,
        client.timeout_or_default(timeout),
        &failure_message,
    )
    .await
}

/// Same as `get_destination` but answers from the canned GeoNames response.
pub fn get_destination_canned(canned: &CannedData) -> NormalizedResult<Destination> {
    canned_and_extract::<GeoNamesSearch>(
        &canned.path(CANNED_DESTINATION_FILE),
        CANNED_FAILURE_MESSAGE,
    )
}
