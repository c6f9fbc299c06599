use anyhow::{Context, Result};
use log::{info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::cache::SnapshotStore;
use crate::config::settings::AppConfig;
use crate::config::tables::ReferenceTables;
use crate::domain::{Clock, SystemClock};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    /// Shared state for the router, loaded from the configured data directory
    pub fn build_state(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Arc<AppState>> {
        let tables = ReferenceTables::build(config.rating.player_tier_scale)
            .context("Reference tables are inconsistent")?;
        let store = SnapshotStore::new(&config.server.data_dir);
        let snapshot = store.load(clock.now())?;

        Ok(Arc::new(AppState::new(snapshot, config, tables, clock)))
    }

    pub async fn run(&self) -> Result<()> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let state = Self::build_state(self.config.clone(), clock)?;

        if self.config.server.revalidate_secs > 0 {
            spawn_revalidation(
                Arc::clone(&state),
                self.config.server.data_dir.clone(),
                Duration::from_secs(self.config.server.revalidate_secs),
            );
        }

        let app = create_router(state)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Reload the snapshot on a fixed interval. A failed reload keeps the
/// previous snapshot in service.
pub fn spawn_revalidation(state: Arc<AppState>, data_dir: PathBuf, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // the first tick completes immediately and the snapshot is fresh
        interval.tick().await;

        loop {
            interval.tick().await;

            let now = state.clock.now();
            let dir = data_dir.clone();
            let loaded = tokio::task::spawn_blocking(move || SnapshotStore::new(dir).load(now)).await;

            match loaded {
                Ok(Ok(snapshot)) => state.replace_snapshot(snapshot),
                Ok(Err(e)) => warn!("Snapshot reload failed, keeping previous: {:#}", e),
                Err(e) => warn!("Snapshot reload task failed: {}", e),
            }
        }
    })
}
