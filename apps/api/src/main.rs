mod builder;
mod config;
mod dashboard;
mod errors;
mod export;
mod models;
mod preview;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileKeyValueStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cvwizard_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Wizard API v{}", env!("CARGO_PKG_VERSION"));

    let kv = Arc::new(FileKeyValueStore::new(config.store_path.clone()));
    let path = kv.path().display().to_string();
    let store = ResumeStore::new(kv, config.store_key.clone());
    info!("Resume store at {path} under key '{}'", store.key());

    let dashboard = Dashboard::load(store).await;
    info!("Loaded {} resume(s)", dashboard.resumes().len());

    let state = AppState::new(dashboard, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
