use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::dashboard::Dashboard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single dashboard. Every request goes through this lock, so
    /// operations apply one at a time in lock order.
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub config: Config,
}

impl AppState {
    pub fn new(dashboard: Dashboard, config: Config) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            config,
        }
    }
}
