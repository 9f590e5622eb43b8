//! Booking handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Booking, BookingResponse, CreateBooking};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Public booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/:id", get(get_booking))
        .route("/:id/receipt", post(send_receipt))
        .route("/customer/:email", get(list_customer_bookings))
}

/// Routes that need a signed-in user
pub fn my_booking_routes() -> Router<AppState> {
    Router::new().route("/mine", get(my_bookings))
}

fn respond(bookings: Vec<Booking>) -> Vec<BookingResponse> {
    let now = Utc::now();
    bookings
        .into_iter()
        .map(|booking| BookingResponse::at(booking, now))
        .collect()
}

/// Book seats and snacks for a showtime
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 400, description = "Validation error or unavailable snacks"),
        (status = 404, description = "Showtime not found"),
        (status = 409, description = "Seats are no longer available")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBooking>,
) -> AppResult<Created<BookingResponse>> {
    let booking = state.booking_service.create(payload).await?;
    Ok(Created(BookingResponse::at(booking, Utc::now())))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingResponse>>> {
    let booking = state.booking_service.get_booking(id).await?;
    Ok(Json(ApiResponse::success(BookingResponse::at(booking, Utc::now()))))
}

/// Bookings made with an e-mail address, newest first
#[utoipa::path(
    get,
    path = "/api/bookings/customer/{email}",
    tag = "Bookings",
    params(("email" = String, Path, description = "Customer e-mail")),
    responses((status = 200, description = "Customer bookings", body = [BookingResponse]))
)]
pub async fn list_customer_bookings(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<BookingResponse>>>> {
    let bookings = state.booking_service.list_for_customer(&email).await?;
    Ok(Json(ApiResponse::success(respond(bookings))))
}

/// Bookings of the signed-in user
#[utoipa::path(
    get,
    path = "/api/bookings/mine",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings made with the account e-mail", body = [BookingResponse]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<BookingResponse>>>> {
    let bookings = state.booking_service.list_for_customer(&user.email).await?;
    Ok(Json(ApiResponse::success(respond(bookings))))
}

/// Queue the confirmation e-mail
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/receipt",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 202, description = "Receipt queued"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn send_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    state.booking_service.send_receipt(id).await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::message("Receipt queued"))))
}
