//! Fixtures shared by service tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Movie, Seat, SeatType, Showtime, Snack};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    BookingRepository, MockBookingRepository, MockMovieRepository, MockSeatRepository,
    MockShowtimeRepository, MockSnackRepository, MockUserRepository, MovieRepository,
    SeatRepository, ShowtimeRepository, SnackRepository, UserRepository,
};
use crate::infra::{Persistence, TransactionContext, TxFuture, UnitOfWork};

/// UnitOfWork over mocked repositories.
///
/// Transactions run against a SeaORM mock connection when one was given
/// with [`TestUnitOfWork::with_writes`], and fail otherwise.
pub struct TestUnitOfWork {
    movies: Arc<MockMovieRepository>,
    showtimes: Arc<MockShowtimeRepository>,
    seats: Arc<MockSeatRepository>,
    snacks: Arc<MockSnackRepository>,
    bookings: Arc<MockBookingRepository>,
    users: Arc<MockUserRepository>,
    tx: Option<Persistence>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            movies: Arc::new(MockMovieRepository::new()),
            showtimes: Arc::new(MockShowtimeRepository::new()),
            seats: Arc::new(MockSeatRepository::new()),
            snacks: Arc::new(MockSnackRepository::new()),
            bookings: Arc::new(MockBookingRepository::new()),
            users: Arc::new(MockUserRepository::new()),
            tx: None,
        }
    }
}

impl TestUnitOfWork {
    pub fn movies(mut self, repo: MockMovieRepository) -> Self {
        self.movies = Arc::new(repo);
        self
    }

    pub fn showtimes(mut self, repo: MockShowtimeRepository) -> Self {
        self.showtimes = Arc::new(repo);
        self
    }

    pub fn seats(mut self, repo: MockSeatRepository) -> Self {
        self.seats = Arc::new(repo);
        self
    }

    pub fn snacks(mut self, repo: MockSnackRepository) -> Self {
        self.snacks = Arc::new(repo);
        self
    }

    pub fn bookings(mut self, repo: MockBookingRepository) -> Self {
        self.bookings = Arc::new(repo);
        self
    }

    pub fn users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    /// Accept transactional writes, each affecting the given number of rows.
    pub fn with_writes(mut self, rows_affected: &[u64]) -> Self {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(rows_affected.iter().map(|&rows| MockExecResult {
                last_insert_id: 0,
                rows_affected: rows,
            }))
            .into_connection();
        self.tx = Some(Persistence::new(db));
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movies.clone()
    }

    fn showtimes(&self) -> Arc<dyn ShowtimeRepository> {
        self.showtimes.clone()
    }

    fn seats(&self) -> Arc<dyn SeatRepository> {
        self.seats.clone()
    }

    fn snacks(&self) -> Arc<dyn SnackRepository> {
        self.snacks.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        match &self.tx {
            Some(persistence) => persistence.transaction(f).await,
            None => Err(AppError::internal("Transactions not supported in test mock")),
        }
    }
}

pub fn movie(title: &str) -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        duration: 148,
        genre: "Sci-Fi".to_string(),
        rating: "PG-13".to_string(),
        poster_url: None,
        price: Decimal::new(1250, 2),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Showtime tomorrow with a 12.50 ticket price.
pub fn showtime() -> Showtime {
    let movie = movie("Inception");
    Showtime {
        id: Uuid::new_v4(),
        movie_id: movie.id,
        start_time: Utc::now() + Duration::days(1),
        theater_room: "Theater 1".to_string(),
        total_seats: 100,
        created_at: Utc::now(),
        movie,
    }
}

pub fn seat(showtime_id: Uuid, row: &str, number: i32) -> Seat {
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

pub fn snack(name: &str, cents: i64) -> Snack {
    Snack {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        category: "Snacks".to_string(),
        image_url: None,
        available: true,
        created_at: Utc::now(),
    }
}
