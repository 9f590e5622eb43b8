//! CineMax - movie theater booking backend
//!
//! REST API for browsing movies and showtimes, holding seats for 15
//! minutes, ordering snacks and confirming bookings.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve`, `migrate`, `jobs`, `seed`
//! - **config**: environment configuration and constants
//! - **domain**: entities and booking rules (seat holds, pricing)
//! - **services**: use-cases over a Unit of Work
//! - **infra**: SeaORM persistence, migrations, Redis cache
//! - **jobs**: receipt e-mails, inline or through an apalis queue
//! - **api**: axum handlers, middleware, routes, OpenAPI
//! - **types**: response envelopes
//! - **errors**: `AppError` and its HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! cinemax migrate up
//! cinemax seed
//! cinemax serve --port 4000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
