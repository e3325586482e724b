//! # Rentify
//!
//! Client side of a car rental platform: the car catalog with its filter
//! form, the review form, and the admin analytics dashboard, all driven by
//! the rental backend's REST API.
//!
//! ## Modules
//!
//! - [`client`]: Backend access behind the [`RentalApi`] capability
//! - [`catalog`]: Filterable car list and gated detail navigation
//! - [`review`]: Star rating and comment form with validation
//! - [`dashboard`]: Fetch → validate → aggregate pipeline for admins
//! - [`analytics`]: Pure aggregations and chart reshaping
//! - [`render`]: Terminal tables and CSV
//! - [`api`]: Backend-for-frontend HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rentify::client::HttpRentalClient;
//! use rentify::config::BackendConfig;
//! use rentify::dashboard::Dashboard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpRentalClient::new(BackendConfig::default())?;
//!
//!     let mut dashboard = Dashboard::new(Arc::new(client));
//!     dashboard.refresh().await;
//!
//!     if let Some(report) = dashboard.report() {
//!         println!("Revenue: {}", report.stats.revenue);
//!         println!("Success rate: {:.1}%", report.kpis.booking_success_rate);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod render;
pub mod review;
pub mod session;

// Re-export top-level types for convenience
pub use models::{Booking, BookingStatus, Car, Payment, Snapshot, User};

pub use client::{ClientError, FixtureApi, HttpRentalClient, RentalApi};

pub use analytics::{DashboardCharts, DashboardReport, Kpis, SummaryStats};

pub use dashboard::{Dashboard, DashboardError, DashboardState};

pub use catalog::{CarFilters, CatalogView, FilterField, FilterOptions, Navigation};

pub use review::{ReviewError, ReviewForm, ReviewSubmission};

pub use session::Session;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, BackendConfig, Config, ConfigError, LoggingConfig};
