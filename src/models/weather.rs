use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDesc {
    pub desc: String,
    pub icon_url: String,
}

/// Current weather (`is_current`) or the furthest day of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub is_current: bool,
    pub temp: f64,
    /// Forecast only.
    pub temp_min: Option<f64>,
    /// Forecast only.
    pub temp_max: Option<f64>,
    pub desc: WeatherDesc,
}
