use std::{process, sync::Arc};

use actix_web::{middleware::Logger, web, App, HttpServer};

use trip_planner_api::{
    config::{Config, ConfigError, RunEnv},
    db::trip_store::InMemoryTripStore,
    logger, routes,
    state::AppState,
};

// Missing or invalid configuration.
const EXIT_CONFIG: i32 = 2;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    logger::init(RunEnv::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingCredentials(missing)) => {
            for name in missing {
                log::error!("environment variable {} must be set", name);
            }
            process::exit(EXIT_CONFIG);
        }
        Err(err) => {
            log::error!("invalid configuration: {}", err);
            process::exit(EXIT_CONFIG);
        }
    };

    let run_env = config.run_env;
    let (host, port) = (config.host.clone(), config.port);
    log::info!(
        "starting server: host={}, port={}, env={}, upstream_timeout_ms={}",
        host,
        port,
        run_env,
        config.timeout.as_millis()
    );

    let state = web::Data::new(AppState::new(config, Arc::new(InMemoryTripStore::new())));

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| routes::configure(cfg, run_env))
    })
    .bind((host, port))?
    .run()
    .await
}
