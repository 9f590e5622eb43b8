//! Background jobs.
//!
//! Receipts are handed to a [`ReceiptQueue`]. With `JOBS_ENABLED` they go to
//! an apalis Postgres queue drained by `cinemax jobs work`; otherwise they
//! are delivered inline.

mod receipt_job;

use async_trait::async_trait;
use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;

use crate::errors::{AppError, AppResult};

pub use receipt_job::{receipt_job_handler, ReceiptJob};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Where booking receipts are sent for delivery.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReceiptQueue: Send + Sync {
    async fn enqueue(&self, job: ReceiptJob) -> AppResult<()>;
}

/// Delivers receipts immediately on the request task.
pub struct InlineReceipts;

#[async_trait]
impl ReceiptQueue for InlineReceipts {
    async fn enqueue(&self, job: ReceiptJob) -> AppResult<()> {
        receipt_job_handler(job).await
    }
}

/// Pushes receipts to the apalis Postgres queue.
pub struct PostgresReceiptQueue {
    storage: PostgresStorage<ReceiptJob>,
}

impl PostgresReceiptQueue {
    pub fn new(storage: PostgresStorage<ReceiptJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ReceiptQueue for PostgresReceiptQueue {
    async fn enqueue(&self, job: ReceiptJob) -> AppResult<()> {
        let booking_id = job.booking_id;
        self.storage
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue receipt: {}", e)))?;

        tracing::debug!(booking_id = %booking_id, "Receipt queued");
        Ok(())
    }
}

/// Connect to Postgres and make sure the apalis tables exist.
pub async fn connect_receipt_storage(database_url: &str) -> AppResult<PostgresStorage<ReceiptJob>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to job database: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    Ok(PostgresStorage::new(pool))
}
