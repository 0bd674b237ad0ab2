use std::fmt::Debug;

use actix_cors::Cors;
use actix_web::{error::InternalError, web, HttpResponse};
use serde::Serialize;

use crate::{
    config::RunEnv,
    middleware::validation::ValidationErrors,
    models::api::{ApiError, NormalizedResult},
};

pub mod health;
pub mod search;
pub mod trips;

pub const MALFORMED_BODY_MESSAGE: &str = "Malformed JSON body.";
pub const MALFORMED_QUERY_MESSAGE: &str = "Malformed query string.";

/// Registers every route. The canned search routes only exist outside production.
pub fn configure(cfg: &mut web::ServiceConfig, run_env: RunEnv) {
    let mut search_scope = web::scope("/search")
        .route("/destination", web::post().to(search::find_destination))
        .route("/weather", web::post().to(search::find_weather))
        .route("/picture", web::post().to(search::find_picture));
    if !run_env.is_production() {
        search_scope = search_scope.service(
            web::scope("/test")
                .route("/destination", web::post().to(search::find_destination_canned))
                .route("/weather", web::post().to(search::find_weather_canned))
                .route("/picture", web::post().to(search::find_picture_canned)),
        );
    }

    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health::health_check))
        .service(search_scope)
        .service(
            web::scope("/trips")
                .route("", web::get().to(trips::list_trips))
                .route("", web::post().to(trips::create_trip))
                .route("/categories", web::get().to(trips::list_trip_categories))
                .route("/{tripId}", web::delete().to(trips::delete_trip)),
        );
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Bodies are parsed as JSON whatever the content type; unparsable ones get a 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::warn!("rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(ApiError::new(MALFORMED_BODY_MESSAGE));
            InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("rejected query string: {}", err);
        let response = HttpResponse::BadRequest().json(ApiError::new(MALFORMED_QUERY_MESSAGE));
        InternalError::from_response(err, response).into()
    })
}

/// Relays a service result unchanged.
pub(crate) fn relay<T: Serialize + Debug>(fn_name: &str, result: NormalizedResult<T>) -> HttpResponse {
    log::info!(
        "exiting: fn={}, status={}, body={:?}",
        fn_name,
        result.status.as_u16(),
        result.body
    );
    result.into_response()
}

pub(crate) fn reject(fn_name: &str, errors: ValidationErrors) -> HttpResponse {
    log::info!("exiting: fn={}, status=422, errors={:?}", fn_name, errors.errors);
    errors.into_response()
}
