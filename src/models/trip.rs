use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{picture::Picture, weather::Weather};

/// Destination as saved with a trip. Unlike search results, coordinates are numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDestination {
    pub lon: f64,
    pub lat: f64,
    pub name: String,
    pub country_name: String,
}

/// A trip submitted by the client, before it gets an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub destination: TripDestination,
    /// Epoch milliseconds.
    pub date_departing: i64,
    /// Epoch milliseconds.
    pub date_returning: i64,
    pub weather: Weather,
    pub picture: Picture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_id: Uuid,
    pub destination: TripDestination,
    pub date_departing: i64,
    pub date_returning: i64,
    pub weather: Weather,
    pub picture: Picture,
}

impl Trip {
    pub fn from_new(trip_id: Uuid, new_trip: NewTrip) -> Self {
        Self {
            trip_id,
            destination: new_trip.destination,
            date_departing: new_trip.date_departing,
            date_returning: new_trip.date_returning,
            weather: new_trip.weather,
            picture: new_trip.picture,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCreated {
    pub trip_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMessage {
    pub message: String,
}

/// Trips split relative to a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripCategories {
    pub ongoing: Vec<Trip>,
    pub pending: Vec<Trip>,
    pub past: Vec<Trip>,
}
