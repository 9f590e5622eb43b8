//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories through a Unit of
//! Work and are consumed by the HTTP handlers as trait objects.

mod auth_service;
mod booking_service;
pub mod container;
mod movie_service;
mod seat_service;
mod showtime_service;
mod snack_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{parallel, ServiceContainer, Services};

pub use auth_service::{AuthService, AuthSession, Authenticator, Claims};
pub use booking_service::{BookingManager, BookingService};
pub use movie_service::{MovieCatalog, MovieService};
pub use seat_service::{SeatKeeper, SeatService};
pub use showtime_service::{ShowtimeSchedule, ShowtimeService};
pub use snack_service::{SnackBar, SnackService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
