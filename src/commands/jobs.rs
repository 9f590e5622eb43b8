//! Jobs command - receipt queue management.
//!
//! ```bash
//! cinemax jobs work    # drain the receipt queue
//! cinemax jobs list    # counts by status
//! cinemax jobs clear   # drop failed jobs
//! ```

use apalis::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::{Config, JOB_NAME_RECEIPT};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::jobs::{connect_receipt_storage, receipt_job_handler};

const JOB_STATUSES: [&str; 4] = ["Pending", "Running", "Failed", "Done"];

pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Process queued receipts until Ctrl+C.
async fn run_worker(config: &Config) -> AppResult<()> {
    let storage = connect_receipt_storage(&config.database_url).await?;

    let worker = WorkerBuilder::new(JOB_NAME_RECEIPT)
        .backend(storage)
        .build_fn(receipt_job_handler);

    tracing::info!(worker = JOB_NAME_RECEIPT, "Receipt worker started. Press Ctrl+C to stop.");

    tokio::select! {
        result = Monitor::new().register(worker).run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Worker failed");
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Receipt worker stopped");
    Ok(())
}

/// Whether `cinemax jobs work` has created the apalis schema yet.
async fn queue_initialized(db: &DatabaseConnection) -> AppResult<bool> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') AS exists",
        ))
        .await?;

    Ok(row
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false))
}

async fn list_jobs(config: &Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(config).await?.get_connection();

    if !queue_initialized(&db).await? {
        println!("Job queue not initialized. Run `cinemax jobs work` once to create it.");
        return Ok(());
    }

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT status::text AS status, COUNT(*)::bigint AS count FROM apalis.jobs GROUP BY status",
        ))
        .await?;

    let counts: Vec<(String, i64)> = rows
        .iter()
        .filter_map(|row| {
            Some((
                row.try_get::<String>("", "status").ok()?,
                row.try_get::<i64>("", "count").ok()?,
            ))
        })
        .collect();

    println!("\n=== Receipt Queue ===");
    for status in JOB_STATUSES {
        let count = counts
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, c)| *c)
            .unwrap_or(0);
        println!("{:<9} {}", format!("{}:", status), count);
    }
    println!("=====================\n");

    Ok(())
}

async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(config).await?.get_connection();

    if !queue_initialized(&db).await? {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    let result = db
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed'",
        ))
        .await?;

    println!("Cleared {} failed job(s).", result.rows_affected());
    Ok(())
}
