//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};
use crate::jobs::{connect_receipt_storage, InlineReceipts, PostgresReceiptQueue, ReceiptQueue};

pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!(environment = %config.environment, "Starting server...");

    let db = Arc::new(Database::connect(&config).await?);

    let cache = match config.redis_url.as_deref() {
        Some(url) => match Cache::connect(url).await {
            Ok(cache) => Some(Arc::new(cache)),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, running without cache");
                None
            }
        },
        None => {
            tracing::warn!("REDIS_URL not set, caching and rate limiting disabled");
            None
        }
    };

    let receipts: Arc<dyn ReceiptQueue> = if config.jobs_enabled {
        let storage = connect_receipt_storage(&config.database_url).await?;
        tracing::info!("Receipts go to the background job queue");
        Arc::new(PostgresReceiptQueue::new(storage))
    } else {
        Arc::new(InlineReceipts)
    };

    let cors_origin = config.cors_origin.clone();
    let app = create_router(AppState::from_config(db, cache, config, receipts), &cors_origin);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    // Socket addresses feed the per-client rate limit buckets.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
