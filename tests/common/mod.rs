#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use trip_planner_api::{
    config::{default_canned_dir, Config},
    db::trip_store::InMemoryTripStore,
    routes,
    services::upstream::extractor::read_canned,
    state::AppState,
};

pub const CREDENTIALS: [(&str, &str); 3] = [
    ("GEONAMES_USERNAME", "traveler"),
    ("WEATHERBIT_API_KEY", "wb-key-123456"),
    ("PIXABAY_API_KEY", "px-key-654321"),
];

/// Milliseconds the stub's slow routes wait before answering.
pub const SLOW_MS: u64 = 500;

pub fn fixture(file: &str) -> Value {
    read_canned(&default_canned_dir().join(file)).expect("fixture exists")
}

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Credentials plus `overrides`, as if read from the environment.
    pub fn with_env(overrides: &[(&str, &str)]) -> Self {
        let vars: HashMap<String, String> = CREDENTIALS
            .iter()
            .chain(overrides)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config");

        Self {
            state: web::Data::new(AppState::new(config, Arc::new(InMemoryTripStore::new()))),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let run_env = self.state.config.run_env;
        App::new()
            .app_data(self.state.clone())
            .configure(move |cfg| routes::configure(cfg, run_env))
    }
}

/// Local stand-in for GeoNames, WeatherBit and Pixabay.
pub struct StubUpstream {
    pub addr: SocketAddr,
}

impl StubUpstream {
    pub async fn start() -> Self {
        let server = HttpServer::new(|| {
            App::new()
                .route("/geonames", web::get().to(geonames))
                .route("/weatherbit/current", web::get().to(weatherbit_current))
                .route("/weatherbit/forecast/daily", web::get().to(weatherbit_forecast))
                .route("/pixabay/", web::get().to(pixabay))
                .route("/slow/geonames", web::get().to(slow_geonames))
                .route("/broken/pixabay/", web::get().to(rate_limited))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub upstream");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Environment pointing every upstream at this stub.
    pub fn env(&self) -> Vec<(String, String)> {
        vec![
            ("GEONAMES_BASE_URL".to_string(), self.url("/geonames")),
            ("WEATHERBIT_CURRENT_URL".to_string(), self.url("/weatherbit/current")),
            (
                "WEATHERBIT_FORECAST_URL".to_string(),
                self.url("/weatherbit/forecast/daily"),
            ),
            ("PIXABAY_BASE_URL".to_string(), self.url("/pixabay/")),
        ]
    }
}

pub fn as_pairs(env: &[(String, String)]) -> Vec<(&str, &str)> {
    env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

async fn geonames(req: HttpRequest) -> HttpResponse {
    if req.query_string().contains("q=Lamboing") {
        HttpResponse::Ok().json(fixture("lamboing-geonames.json"))
    } else {
        HttpResponse::Ok().json(json!({"totalResultsCount": 0, "geonames": []}))
    }
}

async fn weatherbit_current() -> HttpResponse {
    HttpResponse::Ok().json(fixture("lamboing-weatherbit-current.json"))
}

async fn weatherbit_forecast() -> HttpResponse {
    HttpResponse::Ok().json(fixture("lamboing-weatherbit-forecast.json"))
}

async fn pixabay(req: HttpRequest) -> HttpResponse {
    if req.query_string().contains("key=px-key-654321") {
        HttpResponse::Ok().json(fixture("lamboing-pixabay.json"))
    } else {
        HttpResponse::BadRequest().body("[ERROR 400] Invalid or missing API key")
    }
}

async fn slow_geonames(req: HttpRequest) -> HttpResponse {
    tokio::time::sleep(Duration::from_millis(SLOW_MS)).await;
    geonames(req).await
}

async fn rate_limited() -> HttpResponse {
    HttpResponse::TooManyRequests().json(json!({"hits": []}))
}
