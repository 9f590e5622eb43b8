//! Showtime repository. Every showtime is loaded together with its movie.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use super::entities::movie::Entity as MovieEntity;
use super::entities::showtime::{self, Entity as ShowtimeEntity};
use crate::domain::Showtime;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ShowtimeRepository: Send + Sync {
    /// Showtimes starting at or after `from`, soonest first
    async fn list_upcoming(&self, from: DateTime<Utc>) -> AppResult<Vec<Showtime>>;

    /// Every showtime of a movie, soonest first
    async fn list_by_movie(&self, movie_id: Uuid) -> AppResult<Vec<Showtime>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Showtime>>;
}

pub struct ShowtimeStore {
    db: DatabaseConnection,
}

impl ShowtimeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, query: Select<ShowtimeEntity>) -> AppResult<Vec<Showtime>> {
        let rows = query
            .order_by_asc(showtime::Column::StartTime)
            .find_also_related(MovieEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(showtime, movie)| movie.map(|m| showtime.into_domain(m)))
            .collect())
    }
}

#[async_trait]
impl ShowtimeRepository for ShowtimeStore {
    async fn list_upcoming(&self, from: DateTime<Utc>) -> AppResult<Vec<Showtime>> {
        self.fetch(ShowtimeEntity::find().filter(showtime::Column::StartTime.gte(from)))
            .await
    }

    async fn list_by_movie(&self, movie_id: Uuid) -> AppResult<Vec<Showtime>> {
        self.fetch(ShowtimeEntity::find().filter(showtime::Column::MovieId.eq(movie_id)))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Showtime>> {
        let mut rows = self
            .fetch(ShowtimeEntity::find().filter(showtime::Column::Id.eq(id)))
            .await?;
        Ok(rows.pop())
    }
}
