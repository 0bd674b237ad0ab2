//! Destination pictures through the Pixabay API.

use serde::Deserialize;
use url::Url;

use crate::{
    models::{api::NormalizedResult, picture::Picture},
    services::upstream::{
        canned_and_extract, fetch_and_extract, CannedData, Extractor, RequestTimeout, Transport,
        UpstreamClient,
    },
};

pub const PIXABAY_API_BASE_URL: &str = "https://pixabay.com/api/";

pub const CANNED_PICTURE_FILE: &str = "lamboing-pixabay.json";

const CANNED_FAILURE_MESSAGE: &str = "Failed to find canned picture data.";

const PER_PAGE: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct PixabayResponse {
    pub hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
pub struct PixabayHit {
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
}

pub struct PixabaySearch;

impl Extractor for PixabaySearch {
    type Response = PixabayResponse;
    type Output = Picture;

    const API_NAME: &'static str = "Pixabay";
    const NOT_FOUND_MESSAGE: &'static str = "No picture available for given location.";

    fn is_empty(response: &PixabayResponse) -> bool {
        response.hits.is_empty()
    }

    fn extract(response: PixabayResponse) -> Option<Picture> {
        response.hits.into_iter().next().map(|hit| Picture {
            image_url: hit.webformat_url,
        })
    }
}

pub fn make_url(base: &Url, name: &str, country_name: &str, api_key: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("key", api_key)
        .append_pair("q", &format!("{} {}", name, country_name))
        .append_pair("lang", "en")
        .append_pair("image_type", "photo")
        .append_pair("safesearch", "true")
        .append_pair("order", "popular")
        .append_pair("per_page", &PER_PAGE.to_string());
    url
}

/// Most popular photo matching the destination and its country.
pub async fn get_picture<T: Transport>(
    client: &UpstreamClient<T>,
    name: &str,
    country_name: &str,
    api_key: &str,
    timeout: Option<RequestTimeout>,
) -> NormalizedResult<Picture> {
    let url = make_url(&client.endpoints().pixabay, name, country_name, api_key);
    log::info!(
        "built request URL: fn=get_picture, url={}",
        client.loggable_url(&url, api_key)
    );

    fetch_and_extract::<PixabaySearch, T>(
        client.transport(),
        &url,
        client.timeout_or_default(timeout),
        "Failed to find picture for given location.",
    )
    .await
}

pub fn get_picture_canned(canned: &CannedData) -> NormalizedResult<Picture> {
    canned_and_extract::<PixabaySearch>(&canned.path(CANNED_PICTURE_FILE), CANNED_FAILURE_MESSAGE)
}
