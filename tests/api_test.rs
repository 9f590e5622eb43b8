//! Router-level tests.
//!
//! The real router runs against hand-written service stubs, a disconnected
//! database and no cache, so no Postgres or Redis is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use cinemax::api::{create_router, AppState};
use cinemax::domain::{
    reservation_ttl, Booking, BookingStatus, CreateBooking, LoginUser, Movie, RegisterUser, Seat,
    SeatLayout, SeatReservation, SeatType, Showtime, Snack, SnackMenu, User, UserResponse,
};
use cinemax::errors::{AppError, AppResult};
use cinemax::infra::Database;
use cinemax::services::{
    AuthService, AuthSession, BookingService, Claims, MovieService, SeatService,
    ServiceContainer, ShowtimeService, SnackService,
};

const ORIGIN: &str = "http://localhost:5173";
const VALID_TOKEN: &str = "valid-test-token";
const CUSTOMER: &str = "jane@example.com";

// =============================================================================
// Fixtures
// =============================================================================

fn movie() -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: "Inception".to_string(),
        description: None,
        duration: 148,
        genre: "Sci-Fi".to_string(),
        rating: "PG-13".to_string(),
        poster_url: Some("https://example.com/inception.png".to_string()),
        price: Decimal::new(1400, 2),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn showtime() -> Showtime {
    let movie = movie();
    Showtime {
        id: Uuid::new_v4(),
        movie_id: movie.id,
        start_time: Utc::now() + Duration::hours(3),
        theater_room: "Theater 1".to_string(),
        total_seats: 100,
        created_at: Utc::now(),
        movie,
    }
}

fn seat(showtime_id: Uuid, row: &str, number: i32) -> Seat {
    Seat {
        id: Uuid::new_v4(),
        showtime_id,
        seat_row: row.to_string(),
        seat_number: number,
        seat_type: SeatType::Regular,
        is_occupied: false,
        reserved_at: None,
        reserved_by: None,
    }
}

fn user(id: Uuid) -> User {
    User {
        id,
        email: CUSTOMER.to_string(),
        password_hash: "hashed".to_string(),
        name: "Jane Doe".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn booking(email: &str) -> Booking {
    let showtime = showtime();
    Booking {
        id: Uuid::new_v4(),
        customer_name: "Jane Doe".to_string(),
        customer_email: email.to_string(),
        customer_phone: None,
        total_amount: Decimal::new(2800, 2),
        status: BookingStatus::Confirmed,
        booking_date: Utc::now(),
        seats: vec![seat(showtime.id, "C", 7), seat(showtime.id, "C", 8)],
        showtime,
        snacks: vec![],
    }
}

// =============================================================================
// Service stubs
// =============================================================================

struct StubAuth;

#[async_trait]
impl AuthService for StubAuth {
    async fn register(&self, request: RegisterUser) -> AppResult<User> {
        if request.email == CUSTOMER {
            return Err(AppError::conflict("User with this email"));
        }
        Ok(User {
            email: request.email,
            name: request.name,
            ..user(Uuid::new_v4())
        })
    }

    async fn login(&self, request: LoginUser) -> AppResult<AuthSession> {
        if request.password != "correct horse" {
            return Err(AppError::InvalidCredentials);
        }
        Ok(AuthSession {
            user: UserResponse::from(user(Uuid::new_v4())),
            token: VALID_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token != VALID_TOKEN {
            return Err(AppError::Unauthorized);
        }
        Ok(Claims {
            sub: Uuid::new_v4(),
            email: CUSTOMER.to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        })
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        Ok(user(id))
    }
}

struct StubMovies;

#[async_trait]
impl MovieService for StubMovies {
    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        Ok(vec![movie()])
    }

    async fn get_movie(&self, _id: Uuid) -> AppResult<Movie> {
        Err(AppError::not_found("Movie"))
    }
}

struct StubShowtimes;

#[async_trait]
impl ShowtimeService for StubShowtimes {
    async fn list_upcoming(&self) -> AppResult<Vec<Showtime>> {
        Ok(vec![showtime()])
    }

    async fn list_for_movie(&self, _movie_id: Uuid) -> AppResult<Vec<Showtime>> {
        Ok(vec![])
    }

    async fn get_showtime(&self, id: Uuid) -> AppResult<Showtime> {
        Ok(Showtime { id, ..showtime() })
    }
}

struct StubSeats;

#[async_trait]
impl SeatService for StubSeats {
    async fn seat_layout(&self, showtime_id: Uuid) -> AppResult<SeatLayout> {
        let mut taken = seat(showtime_id, "A", 2);
        taken.is_occupied = true;
        let seats = vec![seat(showtime_id, "A", 1), taken, seat(showtime_id, "B", 1)];
        Ok(SeatLayout::at(&seats, Utc::now()))
    }

    async fn reserve(
        &self,
        seat_ids: Vec<Uuid>,
        customer_email: String,
    ) -> AppResult<SeatReservation> {
        if customer_email != CUSTOMER {
            return Err(AppError::SeatsUnavailable(vec!["C7".to_string()]));
        }
        assert!(!seat_ids.is_empty());
        Ok(SeatReservation {
            reservation_id: Uuid::new_v4(),
            expires_at: Utc::now() + reservation_ttl(),
        })
    }
}

struct StubSnacks;

#[async_trait]
impl SnackService for StubSnacks {
    async fn menu(&self) -> AppResult<SnackMenu> {
        Ok(SnackMenu::from_snacks(vec![Snack {
            id: Uuid::new_v4(),
            name: "Large Popcorn".to_string(),
            description: None,
            price: Decimal::new(850, 2),
            category: "Snacks".to_string(),
            image_url: None,
            available: true,
            created_at: Utc::now(),
        }]))
    }
}

/// Records the customer e-mail every listing was requested for.
#[derive(Default)]
struct StubBookings {
    listed_for: Mutex<Vec<String>>,
}

#[async_trait]
impl BookingService for StubBookings {
    async fn create(&self, request: CreateBooking) -> AppResult<Booking> {
        Ok(booking(&request.customer_email))
    }

    async fn get_booking(&self, _id: Uuid) -> AppResult<Booking> {
        Err(AppError::not_found("Booking"))
    }

    async fn list_for_customer(&self, email: &str) -> AppResult<Vec<Booking>> {
        if let Ok(mut seen) = self.listed_for.lock() {
            seen.push(email.to_string());
        }
        Ok(vec![booking(email)])
    }

    async fn send_receipt(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

struct StubServices {
    bookings: Arc<StubBookings>,
}

impl ServiceContainer for StubServices {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(StubAuth)
    }

    fn movies(&self) -> Arc<dyn MovieService> {
        Arc::new(StubMovies)
    }

    fn showtimes(&self) -> Arc<dyn ShowtimeService> {
        Arc::new(StubShowtimes)
    }

    fn seats(&self) -> Arc<dyn SeatService> {
        Arc::new(StubSeats)
    }

    fn snacks(&self) -> Arc<dyn SnackService> {
        Arc::new(StubSnacks)
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.bookings.clone()
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app_with(bookings: Arc<StubBookings>) -> Router {
    let database = Arc::new(Database::from_connection(DatabaseConnection::default()));
    let state = AppState::new(&StubServices { bookings }, None, database, "test");
    create_router(state, ORIGIN)
}

fn app() -> Router {
    app_with(Arc::new(StubBookings::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Root, health and docs
// =============================================================================

#[tokio::test]
async fn test_root_welcomes() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("CineMax"));
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let (status, body) = send(app(), get("/api/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert_eq!(body["services"]["cache"]["status"], "disabled");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(app(), get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/bookings"].is_object());
}

#[tokio::test]
async fn test_cors_preflight_allows_frontend() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/bookings")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_movies_envelope() {
    let (status, body) = send(app(), get("/api/movies")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["title"], "Inception");
    assert_eq!(body["data"][0]["price"], json!(14.0));
    assert!(body["data"][0]["posterUrl"].is_string());
}

#[tokio::test]
async fn test_missing_movie_error_envelope() {
    let (status, body) = send(app(), get(&format!("/api/movies/{}", Uuid::new_v4()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Movie not found");
}

#[tokio::test]
async fn test_showtimes_for_unknown_movie_are_empty() {
    let uri = format!("/api/showtimes/movie/{}", Uuid::new_v4());
    let (status, body) = send(app(), get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_showtime_carries_movie() {
    let id = Uuid::new_v4();
    let (status, body) = send(app(), get(&format!("/api/showtimes/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.to_string());
    assert_eq!(body["data"]["movie"]["title"], "Inception");
}

#[tokio::test]
async fn test_snack_menu_groups_categories() {
    let (status, body) = send(app(), get("/api/snacks")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["snacks"][0]["price"], json!(8.5));
    assert_eq!(body["data"]["categories"]["Snacks"][0]["name"], "Large Popcorn");
}

// =============================================================================
// Seats
// =============================================================================

#[tokio::test]
async fn test_seat_layout_shape() {
    let uri = format!("/api/seats/showtime/{}", Uuid::new_v4());
    let (status, body) = send(app(), get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["seats"].as_array().map(Vec::len), Some(3));
    assert_eq!(data["seatMap"]["A"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["seatMap"]["A"][1]["isAvailable"], false);
    assert!(data["seats"][0].get("reservedBy").is_none());
}

#[tokio::test]
async fn test_reserve_requires_seats() {
    let body = json!({ "seatIds": [], "customerEmail": CUSTOMER });
    let (status, body) = send(app(), post_json("/api/seats/reserve", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reserve_rejects_bad_email() {
    let body = json!({ "seatIds": [Uuid::new_v4()], "customerEmail": "nope" });
    let (status, body) = send(app(), post_json("/api/seats/reserve", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid email format");
}

#[tokio::test]
async fn test_reserve_returns_expiry() {
    let body = json!({ "seatIds": [Uuid::new_v4()], "customerEmail": CUSTOMER });
    let (status, body) = send(app(), post_json("/api/seats/reserve", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["reservationId"].is_string());
    assert!(body["data"]["expiresAt"].is_string());
}

#[tokio::test]
async fn test_reserve_conflict_lists_seats() {
    let body = json!({ "seatIds": [Uuid::new_v4()], "customerEmail": "bob@example.com" });
    let (status, body) = send(app(), post_json("/api/seats/reserve", body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SEATS_UNAVAILABLE");
    assert_eq!(body["error"]["message"], "Seats are no longer available: C7");
}

// =============================================================================
// Bookings
// =============================================================================

#[tokio::test]
async fn test_create_booking_returns_created() {
    let body = json!({
        "showtimeId": Uuid::new_v4(),
        "customerName": "Jane Doe",
        "customerEmail": CUSTOMER,
        "seatIds": [Uuid::new_v4(), Uuid::new_v4()]
    });
    let (status, body) = send(app(), post_json("/api/bookings", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["status"], "confirmed");
    assert_eq!(data["totalAmount"], json!(28.0));
    assert_eq!(data["showtimeId"], data["showtime"]["id"]);
    assert_eq!(data["seats"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_create_booking_validates_snack_quantity() {
    let body = json!({
        "showtimeId": Uuid::new_v4(),
        "customerName": "Jane Doe",
        "customerEmail": CUSTOMER,
        "snackItems": [{ "snackId": Uuid::new_v4(), "quantity": 21 }]
    });
    let (status, body) = send(app(), post_json("/api/bookings", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_customer_bookings_by_email() {
    let bookings = Arc::new(StubBookings::default());
    let uri = format!("/api/bookings/customer/{}", CUSTOMER);
    let (status, body) = send(app_with(bookings.clone()), get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["customerEmail"], CUSTOMER);
    assert_eq!(*bookings.listed_for.lock().unwrap(), vec![CUSTOMER.to_string()]);
}

#[tokio::test]
async fn test_my_bookings_requires_token() {
    let (status, body) = send(app(), get("/api/bookings/mine")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_my_bookings_use_token_email() {
    let bookings = Arc::new(StubBookings::default());
    let request = get_with_token("/api/bookings/mine", VALID_TOKEN);
    let (status, _) = send(app_with(bookings.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*bookings.listed_for.lock().unwrap(), vec![CUSTOMER.to_string()]);
}

#[tokio::test]
async fn test_receipt_is_accepted() {
    let uri = format!("/api/bookings/{}/receipt", Uuid::new_v4());
    let (status, body) = send(app(), post_json(&uri, json!({}))).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Receipt queued");
}

#[tokio::test]
async fn test_missing_booking_is_not_found() {
    let (status, body) = send(app(), get(&format!("/api/bookings/{}", Uuid::new_v4()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Booking not found");
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_register_returns_user_without_hash() {
    let body = json!({ "name": "Bob", "email": "bob@example.com", "password": "long enough" });
    let (status, body) = send(app(), post_json("/api/auth/register", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "bob@example.com");
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_short_password() {
    let body = json!({ "name": "Bob", "email": "bob@example.com", "password": "short" });
    let (status, _) = send(app(), post_json("/api/auth/register", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let body = json!({ "name": "Jane", "email": CUSTOMER, "password": "long enough" });
    let (status, body) = send(app(), post_json("/api/auth/register", body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_login_session_shape() {
    let body = json!({ "email": CUSTOMER, "password": "correct horse" });
    let (status, body) = send(app(), post_json("/api/auth/login", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"], VALID_TOKEN);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["expiresIn"], 3600);
    assert_eq!(body["data"]["user"]["email"], CUSTOMER);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let body = json!({ "email": CUSTOMER, "password": "battery staple" });
    let (status, body) = send(app(), post_json("/api/auth/login", body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_with_and_without_token() {
    let (status, _) = send(app(), get_with_token("/api/auth/me", "forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(app(), get_with_token("/api/auth/me", VALID_TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Jane Doe");
}

#[test]
fn test_stub_token_check() {
    tokio_test::assert_ok!(StubAuth.verify_token(VALID_TOKEN));
    tokio_test::assert_err!(StubAuth.verify_token("nope"));
}
