//! Request and response bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Car;

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" or "unreachable"
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Query for the dashboard endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Reference date for the monthly windows (default: today, local time)
    pub today: Option<NaiveDate>,
}

/// Filtered cars plus the choices the filter form offers
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub cars: Vec<Car>,
    pub options: CatalogOptions,
}

#[derive(Debug, Default, Serialize)]
pub struct CatalogOptions {
    pub brands: Vec<String>,
    pub types: Vec<String>,
    /// Models for the selected brand; empty without one
    pub models: Vec<String>,
}

/// Review payload as posted
///
/// The rating is kept as raw JSON so that fractional, string or
/// out-of-range values reach validation instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub rating: serde_json::Value,
    #[serde(default)]
    pub comment: String,
}

impl ReviewRequest {
    /// Whole star count, or 0 (always rejected) for anything else
    pub fn star_rating(&self) -> u8 {
        self.rating.as_u64().and_then(|n| u8::try_from(n).ok()).unwrap_or(0)
    }
}
