//! API middleware.

mod auth;
mod cors;
mod rate_limit;

pub use auth::{auth_middleware, CurrentUser};
pub use cors::cors_layer;
pub use rate_limit::{rate_limit_auth_middleware, rate_limit_middleware};
