//! Service container and parallel helpers.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, BookingManager, BookingService, MovieCatalog, MovieService,
    SeatKeeper, SeatService, ShowtimeSchedule, ShowtimeService, SnackBar, SnackService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;
use crate::jobs::ReceiptQueue;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Access to every application service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn movies(&self) -> Arc<dyn MovieService>;

    fn showtimes(&self) -> Arc<dyn ShowtimeService>;

    fn seats(&self) -> Arc<dyn SeatService>;

    fn snacks(&self) -> Arc<dyn SnackService>;

    fn bookings(&self) -> Arc<dyn BookingService>;
}

/// Services wired to one shared [`Persistence`].
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    movie_service: Arc<dyn MovieService>,
    showtime_service: Arc<dyn ShowtimeService>,
    seat_service: Arc<dyn SeatService>,
    snack_service: Arc<dyn SnackService>,
    booking_service: Arc<dyn BookingService>,
}

impl Services {
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        receipts: Arc<dyn ReceiptQueue>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            movie_service: Arc::new(MovieCatalog::new(uow.clone())),
            showtime_service: Arc::new(ShowtimeSchedule::new(uow.clone())),
            seat_service: Arc::new(SeatKeeper::new(uow.clone())),
            snack_service: Arc::new(SnackBar::new(uow.clone())),
            booking_service: Arc::new(BookingManager::new(uow, receipts)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn movies(&self) -> Arc<dyn MovieService> {
        self.movie_service.clone()
    }

    fn showtimes(&self) -> Arc<dyn ShowtimeService> {
        self.showtime_service.clone()
    }

    fn seats(&self) -> Arc<dyn SeatService> {
        self.seat_service.clone()
    }

    fn snacks(&self) -> Arc<dyn SnackService> {
        self.snack_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }
}

/// Run independent lookups concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Await two fallible futures together, failing fast on the first error.
    ///
    /// # Example
    /// ```ignore
    /// let (seats, snacks) = parallel::join2(
    ///     uow.seats().find_by_ids(&seat_ids),
    ///     uow.snacks().find_by_ids(&snack_ids),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
