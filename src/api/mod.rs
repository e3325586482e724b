//! Rentify REST API
//!
//! Backend-for-frontend layer built with Axum. Handlers read through the
//! shared [`RentalApi`](crate::client::RentalApi) and run the same
//! aggregation and validation code as the CLI.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full analytics report
//! - `GET /api/v1/dashboard/charts` - Chart-ready datasets
//!
//! ## Catalog
//! - `GET /api/v1/cars` - Filtered cars plus filter options
//!
//! ## Reviews
//! - `POST /api/v1/reviews` - Validate a review
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use rentify::api::{serve, AppState};
//! use rentify::client::HttpRentalClient;
//! use rentify::config::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let api = Arc::new(HttpRentalClient::new(config.backend.clone())?);
//!
//!     let state = AppState::new(api, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/dashboard/charts", get(routes::dashboard::get_charts))
        .route("/cars", get(routes::catalog::list_cars))
        .route("/reviews", post(routes::reviews::submit_review));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured front-end origins; permissive when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Rentify API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Rentify API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
