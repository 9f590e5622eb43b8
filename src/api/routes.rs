//! Application route configuration.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    auth_routes, booking_routes, health, me_routes, movie_routes, my_booking_routes, root,
    seat_routes, showtime_routes, snack_routes,
};
use super::middleware::{
    auth_middleware, cors_layer, rate_limit_auth_middleware, rate_limit_middleware,
};
use super::openapi::ApiDoc;
use super::AppState;

/// Build the full application router.
///
/// Everything except `/`, the health check and the docs lives under `/api`
/// behind the general rate limit; `/api/auth` has its own stricter limit.
pub fn create_router(state: AppState, cors_origin: &str) -> Router {
    let bookings = booking_routes().merge(
        my_booking_routes().route_layer(from_fn_with_state(state.clone(), auth_middleware)),
    );

    let auth = auth_routes()
        .merge(me_routes().route_layer(from_fn_with_state(state.clone(), auth_middleware)))
        .route_layer(from_fn_with_state(
            state.clone(),
            rate_limit_auth_middleware,
        ));

    let api = Router::new()
        .nest("/movies", movie_routes())
        .nest("/showtimes", showtime_routes())
        .nest("/seats", seat_routes())
        .nest("/snacks", snack_routes())
        .nest("/bookings", bookings)
        .route_layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .nest("/auth", auth)
        .route("/health", get(health));

    Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
