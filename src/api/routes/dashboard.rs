//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Full report
//! - GET /api/v1/dashboard/charts - Chart-ready datasets
//!
//! Both accept `?today=YYYY-MM-DD` to pin the month window.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::analytics::{DashboardCharts, DashboardReport};
use crate::api::dto::DashboardQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::fetch_snapshot;

async fn build_report(state: &AppState, query: DashboardQuery) -> ApiResult<DashboardReport> {
    let snapshot = fetch_snapshot(state.api.as_ref()).await?.sanitize();
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    Ok(DashboardReport::build(&snapshot, today))
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardReport>> {
    Ok(Json(build_report(&state, query).await?))
}

/// GET /api/v1/dashboard/charts
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardCharts>> {
    let report = build_report(&state, query).await?;
    Ok(Json(report.charts()))
}
