//! Movie handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::cached;
use crate::api::AppState;
use crate::config::CACHE_KEY_MOVIES;
use crate::domain::Movie;
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/:id", get(get_movie))
}

/// List all movies, newest first
#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "Movies",
    responses(
        (status = 200, description = "All movies", body = [Movie])
    )
)]
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Movie>>>> {
    let service = state.movie_service.clone();
    let movies = cached(state.cache.as_deref(), CACHE_KEY_MOVIES, || async move {
        service.list_movies().await
    })
    .await?;

    Ok(Json(ApiResponse::success(movies)))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    tag = "Movies",
    params(("id" = Uuid, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let movie = state.movie_service.get_movie(id).await?;
    Ok(Json(ApiResponse::success(movie)))
}
