//! Showtime domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Movie;

/// A scheduled screening of a movie in one room. Always carries its movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub start_time: DateTime<Utc>,
    #[schema(example = "Theater 1")]
    pub theater_room: String,
    #[schema(example = 100)]
    pub total_seats: i32,
    pub created_at: DateTime<Utc>,
    pub movie: Movie,
}
