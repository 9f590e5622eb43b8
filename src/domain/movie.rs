//! Movie domain entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A movie in the theater catalog. `price` is the ticket price per seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Inception")]
    pub title: String,
    pub description: Option<String>,
    /// Running time in minutes
    #[schema(example = 148)]
    pub duration: i32,
    #[schema(example = "Sci-Fi")]
    pub genre: String,
    #[schema(example = "PG-13")]
    pub rating: String,
    pub poster_url: Option<String>,
    #[schema(value_type = f64, example = 14.0)]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
