//! CORS for the booking frontend.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Allow the configured origin with credentials.
///
/// An origin that is not a valid header value falls back to the default
/// frontend origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin, "Invalid CORS_ORIGIN, using default");
        HeaderValue::from_static(crate::config::DEFAULT_CORS_ORIGIN)
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
