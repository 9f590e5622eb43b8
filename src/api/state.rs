//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::jobs::ReceiptQueue;
use crate::services::{
    AuthService, BookingService, MovieService, SeatService, ServiceContainer, Services,
    ShowtimeService, SnackService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub movie_service: Arc<dyn MovieService>,
    pub showtime_service: Arc<dyn ShowtimeService>,
    pub seat_service: Arc<dyn SeatService>,
    pub snack_service: Arc<dyn SnackService>,
    pub booking_service: Arc<dyn BookingService>,
    /// `None` when REDIS_URL is unset: no catalog caching, no rate limiting
    pub cache: Option<Arc<Cache>>,
    pub database: Arc<Database>,
    /// Deployment environment name reported by the health check
    pub environment: String,
}

impl AppState {
    /// Wire the production services over the database connection.
    pub fn from_config(
        database: Arc<Database>,
        cache: Option<Arc<Cache>>,
        config: Config,
        receipts: Arc<dyn ReceiptQueue>,
    ) -> Self {
        let environment = config.environment.clone();
        let services = Services::from_connection(database.get_connection(), config, receipts);

        Self::new(&services, cache, database, environment)
    }

    /// Build state from any service container.
    pub fn new(
        services: &dyn ServiceContainer,
        cache: Option<Arc<Cache>>,
        database: Arc<Database>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            movie_service: services.movies(),
            showtime_service: services.showtimes(),
            seat_service: services.seats(),
            snack_service: services.snacks(),
            booking_service: services.bookings(),
            cache,
            database,
            environment: environment.into(),
        }
    }
}
