//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_ENVIRONMENT, DEFAULT_JWT_EXPIRATION_HOURS,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Redis is optional; rate limiting and catalog caching are off without it.
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origin: String,
    pub environment: String,
    /// Push receipts to the Postgres job queue instead of sending inline.
    pub jobs_enabled: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("cors_origin", &self.cors_origin)
            .field("environment", &self.environment)
            .field("jobs_enabled", &self.jobs_enabled)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` when present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::config(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::builder(jwt_secret)
            .database_url(env::var("DATABASE_URL").ok())
            .redis_url(env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()))
            .jwt_expiration_hours(env::var("JWT_EXPIRATION_HOURS").ok().and_then(|v| v.parse().ok()))
            .cors_origin(env::var("CORS_ORIGIN").ok())
            .environment(env::var("APP_ENV").ok())
            .jobs_enabled(
                env::var("JOBS_ENABLED")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            )
            .build()
    }

    /// Start building a configuration from a JWT secret, with every other
    /// field at its default.
    pub fn builder(jwt_secret: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Config {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                redis_url: None,
                jwt_secret: jwt_secret.into(),
                jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
                cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
                environment: DEFAULT_ENVIRONMENT.to_string(),
                jobs_enabled: false,
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

/// Builder used by `from_env` and by tests. `None` keeps the default.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn database_url(mut self, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.config.database_url = v;
        }
        self
    }

    pub fn redis_url(mut self, value: Option<String>) -> Self {
        self.config.redis_url = value;
        self
    }

    pub fn jwt_expiration_hours(mut self, value: Option<i64>) -> Self {
        if let Some(v) = value {
            self.config.jwt_expiration_hours = v;
        }
        self
    }

    pub fn cors_origin(mut self, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.config.cors_origin = v;
        }
        self
    }

    pub fn environment(mut self, value: Option<String>) -> Self {
        if let Some(v) = value {
            self.config.environment = v;
        }
        self
    }

    pub fn jobs_enabled(mut self, value: bool) -> Self {
        self.config.jobs_enabled = value;
        self
    }

    /// Validate and finish.
    pub fn build(self) -> AppResult<Config> {
        if self.config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if self.config.jwt_expiration_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRATION_HOURS must be positive"));
        }
        Ok(self.config)
    }
}
