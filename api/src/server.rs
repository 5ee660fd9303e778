//! HTTP server for the CasaVida dashboard API

use crate::creative::CreativeStudio;
use crate::routes;
use anyhow::Result;
use axum::Router;
use casavida_core::{config::AppConfig, dataset::DatasetGenerator, store::CasaStore};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers
pub struct AppState {
    /// The SQLite connection is not Sync; one handler at a time uses it.
    pub store: Mutex<CasaStore>,
    pub studio: CreativeStudio,
    pub generator: DatasetGenerator,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: CasaStore, config: &AppConfig) -> Self {
        Self {
            store: Mutex::new(store),
            studio: CreativeStudio::new(&config.providers),
            generator: DatasetGenerator::new(config.draw_source),
            start_time: Instant::now(),
        }
    }

    /// Open and migrate the configured database, then build the state.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = CasaStore::open(&config.db_path)?;
        store.migrate()?;
        Ok(Self::new(store, config))
    }
}

/// Every route, wired to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::dataset_routes())
        .merge(routes::segment_routes())
        .merge(routes::competitor_routes())
        .merge(routes::initiative_routes())
        .merge(routes::campaign_routes())
        .merge(routes::seed_routes())
        .merge(routes::creative_routes())
        .with_state(Arc::new(state))
        // The dashboard frontend is served from another origin.
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let live = state.studio.live_providers();
    let draw_source = state.generator.source();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    log::info!("Dataset draw source: {}", draw_source.name());
    if live.is_empty() {
        log::info!("Creative Studio: all providers mocked (no credentials)");
    } else {
        log::info!("Creative Studio: live providers {live:?}");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
