use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    services::{
        destination_service::CANNED_DESTINATION_FILE,
        picture_service::CANNED_PICTURE_FILE,
        upstream::CannedData,
        weather_service::{CANNED_CURRENT_FILE, CANNED_FORECAST_FILE},
    },
    state::AppState,
};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: config.run_env.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let credentials = &config.credentials;
    health.services.insert(
        "geonames".to_string(),
        check_credential("GEONAMES_USERNAME", &credentials.geonames_username),
    );
    health.services.insert(
        "weatherbit".to_string(),
        check_credential("WEATHERBIT_API_KEY", &credentials.weatherbit_api_key),
    );
    health.services.insert(
        "pixabay".to_string(),
        check_credential("PIXABAY_API_KEY", &credentials.pixabay_api_key),
    );

    // The canned routes are not served in production.
    if !config.run_env.is_production() {
        health
            .services
            .insert("canned_data".to_string(), check_canned_data(&state.canned));
    }

    // If any service is not ok, the overall status is degraded
    if health.services.values().any(|service| service.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

/// Reports presence only. No part of the value ever reaches the response.
fn check_credential(name: &str, value: &str) -> ServiceStatus {
    if value.is_empty() {
        ServiceStatus::error(format!("{} not configured", name))
    } else {
        ServiceStatus::ok(format!("{} configured", name))
    }
}

fn check_canned_data(canned: &CannedData) -> ServiceStatus {
    let missing: Vec<&str> = [
        CANNED_DESTINATION_FILE,
        CANNED_CURRENT_FILE,
        CANNED_FORECAST_FILE,
        CANNED_PICTURE_FILE,
    ]
    .into_iter()
    .filter(|file| !canned.path(file).is_file())
    .collect();

    if missing.is_empty() {
        log::debug!("canned data found in {}", canned.dir().display());
        ServiceStatus::ok("Canned data available".to_string())
    } else {
        log::warn!(
            "missing canned data in {}: {}",
            canned.dir().display(),
            missing.join(", ")
        );
        ServiceStatus::error(format!("Missing canned data: {}", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_canned_dir;

    #[test]
    fn test_check_credential_reports_presence_only() {
        let status = check_credential("PIXABAY_API_KEY", "px-secret-key-456");

        assert_eq!(status.status, "ok");
        assert_eq!(status.details.as_deref(), Some("PIXABAY_API_KEY configured"));

        let missing = check_credential("PIXABAY_API_KEY", "");
        assert_eq!(missing.status, "error");
        assert_eq!(missing.details.as_deref(), Some("PIXABAY_API_KEY not configured"));
    }

    #[test]
    fn test_check_canned_data() {
        assert_eq!(check_canned_data(&CannedData::new(default_canned_dir())).status, "ok");

        let missing = check_canned_data(&CannedData::new("/nonexistent/canned"));
        assert_eq!(missing.status, "error");
        let details = missing.details.unwrap();
        assert!(details.contains(CANNED_PICTURE_FILE));
        assert!(!details.contains("/nonexistent"));
    }
}
