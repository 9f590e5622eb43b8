//! SeaORM entity definitions
//!
//! Database rows, kept separate from the domain types they convert into.

pub mod booking;
pub mod booking_seat;
pub mod booking_snack;
pub mod movie;
pub mod seat;
pub mod showtime;
pub mod snack;
pub mod user;
