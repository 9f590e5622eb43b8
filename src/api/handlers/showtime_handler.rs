//! Showtime handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::Showtime;
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn showtime_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_upcoming))
        .route("/movie/:movie_id", get(list_for_movie))
        .route("/:id", get(get_showtime))
}

/// Showtimes that have not started yet, soonest first
#[utoipa::path(
    get,
    path = "/api/showtimes",
    tag = "Showtimes",
    responses((status = 200, description = "Upcoming showtimes", body = [Showtime]))
)]
pub async fn list_upcoming(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Showtime>>>> {
    let showtimes = state.showtime_service.list_upcoming().await?;
    Ok(Json(ApiResponse::success(showtimes)))
}

#[utoipa::path(
    get,
    path = "/api/showtimes/movie/{movie_id}",
    tag = "Showtimes",
    params(("movie_id" = Uuid, Path, description = "Movie ID")),
    responses((status = 200, description = "Showtimes of the movie", body = [Showtime]))
)]
pub async fn list_for_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Showtime>>>> {
    let showtimes = state.showtime_service.list_for_movie(movie_id).await?;
    Ok(Json(ApiResponse::success(showtimes)))
}

#[utoipa::path(
    get,
    path = "/api/showtimes/{id}",
    tag = "Showtimes",
    params(("id" = Uuid, Path, description = "Showtime ID")),
    responses(
        (status = 200, description = "Showtime with its movie", body = Showtime),
        (status = 404, description = "Showtime not found")
    )
)]
pub async fn get_showtime(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Showtime>>> {
    let showtime = state.showtime_service.get_showtime(id).await?;
    Ok(Json(ApiResponse::success(showtime)))
}
