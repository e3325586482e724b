//! Rentify API Server
//!
//! Run with: cargo run --bin rentify-api
//!
//! # Configuration
//!
//! Config file from the standard search path, then environment variables:
//! - `RENTIFY_BACKEND_URL`: Rental backend base URL (default: http://localhost:8080/api)
//! - `RENTIFY_AUTH_TOKEN`: Bearer token for admin endpoints (optional)
//! - `RENTIFY_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RENTIFY_API_PORT`: Port to listen on (default: 8083)
//! - `RENTIFY_FIXTURE`: Serve a recorded JSON snapshot instead of the backend
//! - `RUST_LOG`: Log filter (default: rentify=info,tower_http=info)

use std::path::PathBuf;
use std::sync::Arc;

use rentify::api::{serve, AppState};
use rentify::client::{FixtureApi, HttpRentalClient, RentalApi};
use rentify::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    rentify::logging::init(&config.logging);

    tracing::info!("Starting Rentify API server v{}", env!("CARGO_PKG_VERSION"));

    let api: Arc<dyn RentalApi> = match std::env::var("RENTIFY_FIXTURE") {
        Ok(path) => {
            tracing::info!("Serving fixture {}", path);
            Arc::new(FixtureApi::from_path(&PathBuf::from(path))?)
        }
        Err(_) => {
            tracing::info!("Rental backend: {}", config.backend.base_url);
            let client = HttpRentalClient::new(config.backend.clone())?;

            match client.list_cars().await {
                Ok(cars) => tracing::info!(cars = cars.len(), "Backend connection verified"),
                Err(e) => tracing::warn!("Backend not available: {} (requests will return 502)", e),
            }

            Arc::new(client)
        }
    };

    let state = AppState::new(api, config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Rentify API server stopped");
    Ok(())
}
