//! Seat map and seat hold handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ReserveSeats, SeatLayout, SeatReservation};
use crate::errors::AppResult;
use crate::types::ApiResponse;

pub fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/showtime/:showtime_id", get(seat_layout))
        .route("/reserve", post(reserve_seats))
}

/// Seats of a showtime, flat and by row, with live availability
#[utoipa::path(
    get,
    path = "/api/seats/showtime/{showtime_id}",
    tag = "Seats",
    params(("showtime_id" = Uuid, Path, description = "Showtime ID")),
    responses((status = 200, description = "Seat layout", body = SeatLayout))
)]
pub async fn seat_layout(
    State(state): State<AppState>,
    Path(showtime_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SeatLayout>>> {
    let layout = state.seat_service.seat_layout(showtime_id).await?;
    Ok(Json(ApiResponse::success(layout)))
}

/// Hold seats for 15 minutes
#[utoipa::path(
    post,
    path = "/api/seats/reserve",
    tag = "Seats",
    request_body = ReserveSeats,
    responses(
        (status = 200, description = "Seats held", body = SeatReservation),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown seat"),
        (status = 409, description = "Seats are no longer available")
    )
)]
pub async fn reserve_seats(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReserveSeats>,
) -> AppResult<Json<ApiResponse<SeatReservation>>> {
    let reservation = state
        .seat_service
        .reserve(payload.seat_ids, payload.customer_email)
        .await?;

    Ok(Json(ApiResponse::with_message(reservation, "Seats reserved")))
}
