//! OpenAPI document served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, booking_handler, movie_handler, seat_handler, showtime_handler, snack_handler,
};
use crate::domain::{
    BookingResponse, BookingSnackResponse, BookingStatus, CreateBooking, LoginUser, Movie,
    RegisterUser, ReserveSeats, SeatLayout, SeatReservation, SeatResponse, SeatType, Showtime,
    Snack, SnackMenu, SnackOrder, UserResponse,
};
use crate::services::AuthSession;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CineMax API",
        version = "0.1.0",
        description = "Movie theater booking: movies, showtimes, seat holds, snacks and bookings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(
        movie_handler::list_movies,
        movie_handler::get_movie,
        showtime_handler::list_upcoming,
        showtime_handler::list_for_movie,
        showtime_handler::get_showtime,
        seat_handler::seat_layout,
        seat_handler::reserve_seats,
        snack_handler::snack_menu,
        booking_handler::create_booking,
        booking_handler::get_booking,
        booking_handler::list_customer_bookings,
        booking_handler::my_bookings,
        booking_handler::send_receipt,
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
    ),
    components(
        schemas(
            Movie,
            Showtime,
            SeatType,
            SeatResponse,
            SeatLayout,
            ReserveSeats,
            SeatReservation,
            Snack,
            SnackMenu,
            SnackOrder,
            CreateBooking,
            BookingStatus,
            BookingSnackResponse,
            BookingResponse,
            RegisterUser,
            LoginUser,
            UserResponse,
            AuthSession,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Movies", description = "Movie catalog"),
        (name = "Showtimes", description = "Screening schedule"),
        (name = "Seats", description = "Seat maps and 15 minute seat holds"),
        (name = "Snacks", description = "Concession menu"),
        (name = "Bookings", description = "Ticket and snack bookings"),
        (name = "Authentication", description = "Customer accounts")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` JWT scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_booking_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/bookings"));
        assert!(paths.contains_key("/api/seats/reserve"));
        assert!(paths.contains_key("/api/auth/me"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
