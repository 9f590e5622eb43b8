//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod health_handler;
pub mod movie_handler;
pub mod seat_handler;
pub mod showtime_handler;
pub mod snack_handler;

use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

use crate::config::CATALOG_CACHE_TTL_SECONDS;
use crate::errors::AppResult;
use crate::infra::Cache;

pub use auth_handler::{auth_routes, me_routes};
pub use booking_handler::{booking_routes, my_booking_routes};
pub use health_handler::{health, root};
pub use movie_handler::movie_routes;
pub use seat_handler::seat_routes;
pub use showtime_handler::showtime_routes;
pub use snack_handler::snack_routes;

/// Serve `key` from the cache, loading and storing it on a miss.
///
/// Cache failures are logged and fall through to `load`.
pub(crate) async fn cached<T, F, Fut>(cache: Option<&Cache>, key: &str, load: F) -> AppResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let Some(cache) = cache else {
        return load().await;
    };

    match cache.get::<T>(key).await {
        Ok(Some(hit)) => {
            tracing::debug!(key, "Cache hit");
            return Ok(hit);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(key, error = %e, "Cache read failed"),
    }

    let value = load().await?;
    if let Err(e) = cache
        .set_with_ttl(key, &value, CATALOG_CACHE_TTL_SECONDS)
        .await
    {
        tracing::warn!(key, error = %e, "Cache write failed");
    }

    Ok(value)
}
