//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and repositories (SeaORM)
//! - Redis cache
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    BookingRepository, MovieRepository, SeatRepository, ShowtimeRepository, SnackRepository,
    UserRepository,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxBookingRepository, TxFuture, TxSeatRepository, UnitOfWork,
};
