//! Domain layer - theater entities and booking rules.
//!
//! Plain data types plus the pure rules that operate on them: seat hold
//! expiry, snack merging and booking totals. No database or HTTP types.

pub mod booking;
pub mod movie;
pub mod password;
pub mod seat;
pub mod showtime;
pub mod snack;
pub mod user;

pub use booking::{
    booking_total, is_valid_quantity, merge_snack_orders, Booking, BookingResponse,
    BookingSnackLine, BookingSnackResponse, BookingStatus, CreateBooking, NewBooking, SnackOrder,
};
pub use movie::Movie;
pub use password::Password;
pub use seat::{
    reservation_cutoff, reservation_owner, reservation_tag, reservation_ttl, unique_ids, ReserveSeats,
    Seat, SeatLayout, SeatReservation, SeatResponse, SeatType,
};
pub use showtime::Showtime;
pub use snack::{Snack, SnackMenu};
pub use user::{LoginUser, RegisterUser, User, UserResponse};
