//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and wraps multi-table writes (booking
//! creation) in a single database transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{booking, booking_seat, booking_snack, seat};
use super::repositories::{
    BookingRepository, BookingStore, MovieRepository, MovieStore, SeatRepository, SeatStore,
    ShowtimeRepository, ShowtimeStore, SnackRepository, SnackStore, UserRepository, UserStore,
};
use crate::domain::NewBooking;
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because `transaction` is generic. Tests implement
/// it over mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn movies(&self) -> Arc<dyn MovieRepository>;

    fn showtimes(&self) -> Arc<dyn ShowtimeRepository>;

    fn seats(&self) -> Arc<dyn SeatRepository>;

    fn snacks(&self) -> Arc<dyn SnackRepository>;

    fn bookings(&self) -> Arc<dyn BookingRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Committed when the closure succeeds, rolled back when it fails.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn bookings(&self) -> TxBookingRepository<'_> {
        TxBookingRepository { txn: self.txn }
    }

    pub fn seats(&self) -> TxSeatRepository<'_> {
        TxSeatRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    movie_repo: Arc<MovieStore>,
    showtime_repo: Arc<ShowtimeStore>,
    seat_repo: Arc<SeatStore>,
    snack_repo: Arc<SnackStore>,
    booking_repo: Arc<BookingStore>,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            movie_repo: Arc::new(MovieStore::new(db.clone())),
            showtime_repo: Arc::new(ShowtimeStore::new(db.clone())),
            seat_repo: Arc::new(SeatStore::new(db.clone())),
            snack_repo: Arc::new(SnackStore::new(db.clone())),
            booking_repo: Arc::new(BookingStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn movies(&self) -> Arc<dyn MovieRepository> {
        self.movie_repo.clone()
    }

    fn showtimes(&self) -> Arc<dyn ShowtimeRepository> {
        self.showtime_repo.clone()
    }

    fn seats(&self) -> Arc<dyn SeatRepository> {
        self.seat_repo.clone()
    }

    fn snacks(&self) -> Arc<dyn SnackRepository> {
        self.snack_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await?;

        match f(TransactionContext::new(&txn)).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Booking writes inside a transaction.
pub struct TxBookingRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxBookingRepository<'_> {
    /// Insert the booking row with its seat and snack links.
    pub async fn insert(&self, draft: &NewBooking) -> AppResult<()> {
        booking::Entity::insert(booking::ActiveModel {
            id: Set(draft.id),
            showtime_id: Set(draft.showtime_id),
            customer_name: Set(draft.customer_name.clone()),
            customer_email: Set(draft.customer_email.clone()),
            customer_phone: Set(draft.customer_phone.clone()),
            total_amount: Set(draft.total_amount),
            status: Set(draft.status.to_string()),
            booking_date: Set(draft.booking_date),
        })
        .exec_without_returning(self.txn)
        .await?;

        if !draft.seat_ids.is_empty() {
            booking_seat::Entity::insert_many(draft.seat_ids.iter().map(|seat_id| {
                booking_seat::ActiveModel {
                    booking_id: Set(draft.id),
                    seat_id: Set(*seat_id),
                }
            }))
            .exec_without_returning(self.txn)
            .await?;
        }

        if !draft.snack_items.is_empty() {
            booking_snack::Entity::insert_many(draft.snack_items.iter().map(|item| {
                booking_snack::ActiveModel {
                    booking_id: Set(draft.id),
                    snack_id: Set(item.snack_id),
                    quantity: Set(item.quantity),
                }
            }))
            .exec_without_returning(self.txn)
            .await?;
        }

        Ok(())
    }
}

/// Seat writes inside a transaction.
pub struct TxSeatRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxSeatRepository<'_> {
    /// Mark seats occupied and drop their holds.
    ///
    /// # Errors
    /// `Conflict` when any seat was occupied by a concurrent booking.
    pub async fn occupy(&self, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let result = seat::Entity::update_many()
            .col_expr(seat::Column::IsOccupied, Expr::value(true))
            .col_expr(seat::Column::ReservedAt, Expr::value(Option::<DateTime<Utc>>::None))
            .col_expr(seat::Column::ReservedBy, Expr::value(Option::<String>::None))
            .filter(seat::Column::Id.is_in(ids.iter().copied()))
            .filter(seat::Column::IsOccupied.eq(false))
            .exec(self.txn)
            .await?;

        if result.rows_affected != ids.len() as u64 {
            return Err(AppError::conflict("A booking for one of these seats"));
        }

        Ok(())
    }
}

/// Run a transactional block against a Unit of Work.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
