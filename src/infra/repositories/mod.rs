//! Repository layer - Data access abstraction
//!
//! One trait per aggregate, implemented by a SeaORM-backed store and
//! automocked for service tests.

mod booking_repository;
pub(crate) mod entities;
mod movie_repository;
mod seat_repository;
mod showtime_repository;
mod snack_repository;
mod user_repository;

pub use booking_repository::{BookingRepository, BookingStore};
pub use movie_repository::{MovieRepository, MovieStore};
pub use seat_repository::{SeatRepository, SeatStore};
pub use showtime_repository::{ShowtimeRepository, ShowtimeStore};
pub use snack_repository::{SnackRepository, SnackStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use movie_repository::MockMovieRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use seat_repository::MockSeatRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use showtime_repository::MockShowtimeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use snack_repository::MockSnackRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
