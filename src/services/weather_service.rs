//! Current weather and daily forecasts through the WeatherBit APIs.
//!
//! The free plan only forecasts 7 days ahead; for further dates the last forecast day is the best
//! we have.

use serde::Deserialize;
use url::Url;

use crate::{
    models::{
        api::NormalizedResult,
        weather::{Weather, WeatherDesc},
    },
    services::upstream::{
        canned_and_extract, fetch_and_extract, CannedData, Extractor, RequestTimeout, Transport,
        UpstreamClient,
    },
};

/// Base URL of the WeatherBit | Current Weather API.
pub const WEATHERBIT_CURRENT_BASE_URL: &str = "https://api.weatherbit.io/v2.0/current";

/// Base URL of the WeatherBit | Daily Weather Forecast API.
pub const WEATHERBIT_FORECAST_BASE_URL: &str = "https://api.weatherbit.io/v2.0/forecast/daily";

const ICON_BASE_URL: &str = "https://cdn.weatherbit.io/static/img/icons";

pub const CANNED_CURRENT_FILE: &str = "lamboing-weatherbit-current.json";
pub const CANNED_FORECAST_FILE: &str = "lamboing-weatherbit-forecast.json";

const CANNED_FAILURE_MESSAGE: &str = "Failed to get canned weather forecast data.";

#[derive(Debug, Deserialize)]
pub struct WeatherBitResponse {
    /// WeatherBit sends `null` rather than an empty list for unknown places.
    pub data: Option<Vec<WeatherBitRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherBitRecord {
    pub temp: f64,
    #[serde(default)]
    pub min_temp: Option<f64>,
    #[serde(default)]
    pub max_temp: Option<f64>,
    pub weather: WeatherBitDesc,
}

#[derive(Debug, Deserialize)]
pub struct WeatherBitDesc {
    pub description: String,
    pub icon: String,
}

pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_BASE_URL, icon)
}

fn records(response: &WeatherBitResponse) -> &[WeatherBitRecord] {
    response.data.as_deref().unwrap_or_default()
}

fn desc(record: &WeatherBitRecord) -> WeatherDesc {
    WeatherDesc {
        desc: record.weather.description.clone(),
        icon_url: icon_url(&record.weather.icon),
    }
}

/// Current weather: first record, no min/max.
pub struct WeatherCurrent;

impl Extractor for WeatherCurrent {
    type Response = WeatherBitResponse;
    type Output = Weather;

    const API_NAME: &'static str = "Current Weather";
    const NOT_FOUND_MESSAGE: &'static str = "No current weather available for given location.";

    fn is_empty(response: &WeatherBitResponse) -> bool {
        records(response).is_empty()
    }

    fn extract(response: WeatherBitResponse) -> Option<Weather> {
        records(&response).first().map(|record| Weather {
            is_current: true,
            temp: record.temp,
            temp_min: None,
            temp_max: None,
            desc: desc(record),
        })
    }
}

/// Forecast: last record, the furthest day in the future.
pub struct WeatherForecast;

impl Extractor for WeatherForecast {
    type Response = WeatherBitResponse;
    type Output = Weather;

    const API_NAME: &'static str = "Weather Forecasts";
    const NOT_FOUND_MESSAGE: &'static str = "No weather forecast available for given location.";

    fn is_empty(response: &WeatherBitResponse) -> bool {
        records(response).is_empty()
    }

    fn extract(response: WeatherBitResponse) -> Option<Weather> {
        records(&response).last().map(|record| Weather {
            is_current: false,
            temp: record.temp,
            temp_min: record.min_temp,
            temp_max: record.max_temp,
            desc: desc(record),
        })
    }
}

pub fn make_url(base: &Url, lon: f64, lat: f64, api_key: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("key", api_key)
        .append_pair("lang", "en")
        .append_pair("units", "M")
        .append_pair("lat", &format!("{:.5}", lat))
        .append_pair("lon", &format!("{:.5}", lon));
    url
}

/// Whether `num_days` ahead is served by the current-weather endpoint.
pub fn uses_current(num_days: u64) -> bool {
    num_days <= 1
}

/// Current weather when `num_days <= 1`, the forecast otherwise.
pub async fn get_weather<T: Transport>(
    client: &UpstreamClient<T>,
    lon: f64,
    lat: f64,
    num_days: u64,
    api_key: &str,
    timeout: Option<RequestTimeout>,
) -> NormalizedResult<Weather> {
    if uses_current(num_days) {
        get_weather_current(client, lon, lat, api_key, timeout).await
    } else {
        get_weather_forecast(client, lon, lat, api_key, timeout).await
    }
}

pub async fn get_weather_current<T: Transport>(
    client: &UpstreamClient<T>,
    lon: f64,
    lat: f64,
    api_key: &str,
    timeout: Option<RequestTimeout>,
) -> NormalizedResult<Weather> {
    let url = make_url(&client.endpoints().weatherbit_current, lon, lat, api_key);
    log::info!(
        "built request URL: fn=get_weather_current, url={}",
        client.loggable_url(&url, api_key)
    );

    fetch_and_extract::<WeatherCurrent, T>(
        client.transport(),
        &url,
        client.timeout_or_default(timeout),
        "Failed to get current weather for given location.",
    )
    .await
}

pub async fn get_weather_forecast<T: Transport>(
    client: &UpstreamClient<T>,
    lon: f64,
    lat: f64,
    api_key: &str,
    timeout: Option<RequestTimeout>,
) -> NormalizedResult<Weather> {
    let url = make_url(&client.endpoints().weatherbit_forecast, lon, lat, api_key);
    log::info!(
        "built request URL: fn=get_weather_forecast, url={}",
        client.loggable_url(&url, api_key)
    );

    fetch_and_extract::<WeatherForecast, T>(
        client.transport(),
        &url,
        client.timeout_or_default(timeout),
        "Failed to get weather forecast for given location.",
    )
    .await
}

/// Same as `get_weather` but answers from the canned WeatherBit responses.
pub fn get_weather_canned(canned: &CannedData, num_days: u64) -> NormalizedResult<Weather> {
    if uses_current(num_days) {
        canned_and_extract::<WeatherCurrent>(
            &canned.path(CANNED_CURRENT_FILE),
            CANNED_FAILURE_MESSAGE,
        )
    } else {
        canned_and_extract::<WeatherForecast>(
            &canned.path(CANNED_FORECAST_FILE),
            CANNED_FAILURE_MESSAGE,
        )
    }
}
