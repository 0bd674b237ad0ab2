use actix_web::http::StatusCode;
use uuid::Uuid;

use crate::{
    db::trip_store::TripStore,
    models::{
        api::NormalizedResult,
        trip::{NewTrip, Trip, TripCategories, TripCreated, TripMessage},
    },
};

pub const SUCCESS_MESSAGE: &str = "Success.";
pub const NOT_FOUND_MESSAGE: &str = "Not found.";

/// All saved trips, soonest departure first.
pub fn get_trips(store: &dyn TripStore) -> Vec<Trip> {
    let mut trips = store.list();
    trips.sort_by_key(|trip| trip.date_departing);
    trips
}

pub fn add_trip(store: &dyn TripStore, new_trip: NewTrip) -> TripCreated {
    let trip_id = Uuid::new_v4();
    store.put(Trip::from_new(trip_id, new_trip));
    log::info!("saved trip: trip_id={}", trip_id);

    TripCreated {
        trip_id,
        message: SUCCESS_MESSAGE.to_string(),
    }
}

pub fn remove_trip(store: &dyn TripStore, trip_id: &Uuid) -> NormalizedResult<TripMessage> {
    if store.delete(trip_id) {
        log::info!("removed trip: trip_id={}", trip_id);
        NormalizedResult::ok(TripMessage {
            message: SUCCESS_MESSAGE.to_string(),
        })
    } else {
        NormalizedResult::error(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }
}

/// Splits trips relative to `now_ms` (epoch milliseconds).
///
/// A trip is ongoing when `now_ms` falls within its dates (both ends included), pending when it
/// has not started yet and past otherwise. Ongoing and pending trips are sorted by departure,
/// past trips latest first.
pub fn split_trips(trips: Vec<Trip>, now_ms: i64) -> TripCategories {
    let mut categories = TripCategories::default();

    for trip in trips {
        if trip.date_departing <= now_ms && now_ms <= trip.date_returning {
            categories.ongoing.push(trip);
        } else if now_ms < trip.date_departing {
            categories.pending.push(trip);
        } else {
            categories.past.push(trip);
        }
    }

    categories.ongoing.sort_by_key(|trip| trip.date_departing);
    categories.pending.sort_by_key(|trip| trip.date_departing);
    categories
        .past
        .sort_by_key(|trip| std::cmp::Reverse(trip.date_departing));
    categories
}
