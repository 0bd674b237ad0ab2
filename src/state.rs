use std::sync::Arc;

use crate::{
    config::Config,
    db::trip_store::TripStore,
    services::upstream::{CannedData, UpstreamClient},
};

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub canned: CannedData,
    pub trips: Arc<dyn TripStore>,
}

impl AppState {
    pub fn new(config: Config, trips: Arc<dyn TripStore>) -> Self {
        Self {
            upstream: UpstreamClient::from_config(&config),
            canned: CannedData::new(config.canned_dir.clone()),
            config,
            trips,
        }
    }
}
