use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    middleware::validation::{
        validate_destination_query, validate_picture_query, validate_weather_query,
    },
    routes::{reject, relay},
    services::{
        destination_service::{get_destination, get_destination_canned},
        picture_service::{get_picture, get_picture_canned},
        weather_service::{get_weather, get_weather_canned},
    },
    state::AppState,
};

pub async fn find_destination(state: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    let fn_name = "find_destination";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_destination_query(&body) {
        Ok(query) => {
            let username = &state.config.credentials.geonames_username;
            let result = get_destination(&state.upstream, &query.query, username, None).await;
            relay(fn_name, result)
        }
        Err(errors) => reject(fn_name, errors),
    }
}

pub async fn find_weather(state: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    let fn_name = "find_weather";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_weather_query(&body) {
        Ok(query) => {
            let api_key = &state.config.credentials.weatherbit_api_key;
            let result = get_weather(
                &state.upstream,
                query.lon,
                query.lat,
                query.num_days,
                api_key,
                None,
            )
            .await;
            relay(fn_name, result)
        }
        Err(errors) => reject(fn_name, errors),
    }
}

pub async fn find_picture(state: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    let fn_name = "find_picture";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_picture_query(&body) {
        Ok(query) => {
            let api_key = &state.config.credentials.pixabay_api_key;
            let result = get_picture(
                &state.upstream,
                &query.name,
                &query.country_name,
                api_key,
                None,
            )
            .await;
            relay(fn_name, result)
        }
        Err(errors) => reject(fn_name, errors),
    }
}

// Canned variants: same validation, answers come from the fixture files whatever the query.

pub async fn find_destination_canned(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fn_name = "find_destination_canned";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_destination_query(&body) {
        Ok(_) => relay(fn_name, get_destination_canned(&state.canned)),
        Err(errors) => reject(fn_name, errors),
    }
}

pub async fn find_weather_canned(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fn_name = "find_weather_canned";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_weather_query(&body) {
        Ok(query) => relay(fn_name, get_weather_canned(&state.canned, query.num_days)),
        Err(errors) => reject(fn_name, errors),
    }
}

pub async fn find_picture_canned(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fn_name = "find_picture_canned";
    log::info!("entering: fn={}, body={}", fn_name, body.0);

    match validate_picture_query(&body) {
        Ok(_) => relay(fn_name, get_picture_canned(&state.canned)),
        Err(errors) => reject(fn_name, errors),
    }
}
