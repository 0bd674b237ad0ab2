use serde::{Deserialize, Serialize};

/// A destination resolved by the geocoding upstream.
///
/// Coordinates are kept as the decimal strings GeoNames sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub lon: String,
    pub lat: String,
    pub name: String,
    pub country_name: String,
}
