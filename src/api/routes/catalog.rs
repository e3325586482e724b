//! Catalog Routes
//!
//! - GET /api/v1/cars?model&brand&type&minPrice&maxPrice

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CatalogOptions, CatalogResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::catalog::{models_for_brand, CarFilters, FilterOptions};

/// GET /api/v1/cars
///
/// Options always come from the full fleet. Without filters the fleet is
/// the answer; otherwise the backend search runs.
pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<CarFilters>,
) -> ApiResult<Json<CatalogResponse>> {
    let fleet = state.api.list_cars().await?;

    let options = FilterOptions::from_cars(&fleet);
    let options = CatalogOptions {
        brands: options.brands,
        types: options.types,
        models: models_for_brand(&fleet, filters.brand.trim()),
    };

    let params = filters.query_params();
    let cars = if params.is_empty() {
        fleet
    } else {
        state.api.search_cars(&params).await?
    };

    tracing::debug!(filters = params.len(), results = cars.len(), "Catalog query");

    Ok(Json(CatalogResponse {
        total: cars.len(),
        cars,
        options,
    }))
}
