use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use uuid::Uuid;

use crate::models::trip::Trip;

/// Storage seam for saved trips.
pub trait TripStore: Send + Sync {
    fn get(&self, trip_id: &Uuid) -> Option<Trip>;

    /// All trips, in no particular order.
    fn list(&self) -> Vec<Trip>;

    /// Inserts or replaces the trip with the same ID.
    fn put(&self, trip: Trip);

    /// Returns whether a trip was removed.
    fn delete(&self, trip_id: &Uuid) -> bool;
}

/// Trips held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<Uuid, Trip>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// A panic while holding the lock cannot leave the map half-updated, so poisoning is ignored.
impl TripStore for InMemoryTripStore {
    fn get(&self, trip_id: &Uuid) -> Option<Trip> {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips.get(trip_id).cloned()
    }

    fn list(&self) -> Vec<Trip> {
        let trips = self.trips.read().unwrap_or_else(PoisonError::into_inner);
        trips.values().cloned().collect()
    }

    fn put(&self, trip: Trip) {
        let mut trips = self.trips.write().unwrap_or_else(PoisonError::into_inner);
        trips.insert(trip.trip_id, trip);
    }

    fn delete(&self, trip_id: &Uuid) -> bool {
        let mut trips = self.trips.write().unwrap_or_else(PoisonError::into_inner);
        trips.remove(trip_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        picture::Picture,
        trip::TripDestination,
        weather::{Weather, WeatherDesc},
    };

    fn trip(departing: i64) -> Trip {
        Trip {
            trip_id: Uuid::new_v4(),
            destination: TripDestination {
                lon: 7.13476,
                lat: 47.11682,
                name: "Lamboing".to_string(),
                country_name: "Switzerland".to_string(),
            },
            date_departing: departing,
            date_returning: departing + 86_400_000,
            weather: Weather {
                is_current: true,
                temp: 14.2,
                temp_min: None,
                temp_max: None,
                desc: WeatherDesc {
                    desc: "Few clouds".to_string(),
                    icon_url: "https://cdn.weatherbit.io/static/img/icons/c02d.png".to_string(),
                },
            },
            picture: Picture {
                image_url: "https://pixabay.com/get/lamboing_640.jpg".to_string(),
            },
        }
    }

    #[test]
    fn test_put_get_delete() {
        let store = InMemoryTripStore::new();
        let saved = trip(1_000);

        store.put(saved.clone());
        assert_eq!(store.get(&saved.trip_id), Some(saved.clone()));
        assert_eq!(store.list().len(), 1);

        assert!(store.delete(&saved.trip_id));
        assert!(!store.delete(&saved.trip_id));
        assert_eq!(store.get(&saved.trip_id), None);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_put_replaces_same_id() {
        let store = InMemoryTripStore::new();
        let mut saved = trip(1_000);
        store.put(saved.clone());

        saved.date_departing = 2_000;
        store.put(saved.clone());

        assert_eq!(store.list(), vec![saved]);
    }
}
