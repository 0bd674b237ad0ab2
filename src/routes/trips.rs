use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    middleware::validation::{validate_new_trip, validate_trip_id},
    routes::{reject, relay},
    services::trip_service::{add_trip, get_trips, remove_trip, split_trips},
    state::AppState,
};

#[derive(Deserialize)]
pub struct CategoriesParams {
    /// Epoch milliseconds, defaults to the current time.
    now: Option<i64>,
}

pub async fn list_trips(state: web::Data<AppState>) -> HttpResponse {
    let fn_name = "list_trips";
    log::info!("entering: fn={}", fn_name);

    let trips = get_trips(state.trips.as_ref());
    log::info!("exiting: fn={}, status=200, count={}", fn_name, trips.len());
    HttpResponse::Ok().json(trips)
}

pub async fn list_trip_categories(
    state: web::Data<AppState>,
    params: web::Query<CategoriesParams>,
) -> HttpResponse {
    let fn_name = "list_trip_categories";
    let now = params.now.unwrap_or_else(|| Utc::now().timestamp_millis());
    log::info!("entering: fn={}, now={}", fn_name, now);

    let categories = split_trips(state.trips.list(), now);
    log::info!(
        "exiting: fn={}, status=200, ongoing={}, pending={}, past={}",
        fn_name,
        categories.ongoing.len(),
        categories.pending.len(),
        categories.past.len()
    );
    HttpResponse::Ok().json(categories)
}

pub async fn create_trip(state: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    let fn_name = "create_trip";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_new_trip(&body) {
        Ok(new_trip) => {
            let created = add_trip(state.trips.as_ref(), new_trip);
            log::info!("exiting: fn={}, status=200, body={:?}", fn_name, created);
            HttpResponse::Ok().json(created)
        }
        Err(errors) => reject(fn_name, errors),
    }
}

pub async fn delete_trip(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let fn_name = "delete_trip";
    log::info!("entering: fn={}, tripId={}", fn_name, path.as_str());

    match validate_trip_id(&path) {
        Ok(trip_id) => relay(fn_name, remove_trip(state.trips.as_ref(), &trip_id)),
        Err(errors) => reject(fn_name, errors),
    }
}
