//! Monthly analytics endpoints
//!
//! All four take `?month=` (`03`, `3` or `March`); an unknown or missing
//! month matches no rows.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::db::TransactionRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CategoryCount, CombinedData, Month, MonthParams, PriceBucket, Statistics};

/// GET /statistics
async fn statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Statistics>, ApiError> {
    state.readiness.wait().await;
    let stats = TransactionRepo::new(&state.pool)
        .statistics(Month::from(params))
        .await?;
    Ok(Json(stats))
}

/// GET /bar-chart
async fn bar_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<PriceBucket>>, ApiError> {
    state.readiness.wait().await;
    let buckets = TransactionRepo::new(&state.pool)
        .bar_chart(Month::from(params))
        .await?;
    Ok(Json(buckets))
}

/// GET /pie-chart
async fn pie_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    state.readiness.wait().await;
    let slices = TransactionRepo::new(&state.pool)
        .pie_chart(Month::from(params))
        .await?;
    Ok(Json(slices))
}

/// GET /combined-data
async fn combined_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthParams>,
) -> Result<Json<CombinedData>, ApiError> {
    state.readiness.wait().await;
    let combined = TransactionRepo::new(&state.pool)
        .combined(Month::from(params))
        .await?;
    Ok(Json(combined))
}

/// Analytics routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/statistics", get(statistics))
        .route("/bar-chart", get(bar_chart))
        .route("/pie-chart", get(pie_chart))
        .route("/combined-data", get(combined_data))
}
