//! Transaction listing and search endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::db::TransactionRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{SearchParams, Transaction};

/// GET /transactions - every stored row
async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    state.readiness.wait().await;
    let rows = TransactionRepo::new(&state.pool).list_all().await?;
    Ok(Json(rows))
}

/// GET /transactions-search?search=&page=&perPage=
async fn search_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    state.readiness.wait().await;
    let rows = TransactionRepo::new(&state.pool)
        .search(params.text(), params.pagination())
        .await?;
    Ok(Json(rows))
}

/// Transaction routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions-search", get(search_transactions))
}
