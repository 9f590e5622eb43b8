//! Snack menu handler.

use axum::{extract::State, response::Json, routing::get, Router};

use super::cached;
use crate::api::AppState;
use crate::config::CACHE_KEY_SNACKS;
use crate::domain::SnackMenu;
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn snack_routes() -> Router<AppState> {
    Router::new().route("/", get(snack_menu))
}

/// Available snacks, flat and grouped by category
#[utoipa::path(
    get,
    path = "/api/snacks",
    tag = "Snacks",
    responses((status = 200, description = "Snack menu", body = SnackMenu))
)]
pub async fn snack_menu(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SnackMenu>>> {
    let service = state.snack_service.clone();
    let menu = cached(state.cache.as_deref(), CACHE_KEY_SNACKS, || async move {
        service.menu().await
    })
    .await?;

    Ok(Json(ApiResponse::success(menu)))
}
