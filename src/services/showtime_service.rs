//! Showtime schedule use-cases.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Showtime;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ShowtimeService: Send + Sync {
    /// Showtimes that have not started yet
    async fn list_upcoming(&self) -> AppResult<Vec<Showtime>>;

    /// All showtimes of a movie. Unknown movies have none.
    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Showtime>>;

    async fn get_showtime(&self, id: Uuid) -> AppResult<Showtime>;
}

pub struct ShowtimeSchedule<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ShowtimeSchedule<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ShowtimeService for ShowtimeSchedule<U> {
    async fn list_upcoming(&self) -> AppResult<Vec<Showtime>> {
        self.uow.showtimes().list_upcoming(Utc::now()).await
    }

    async fn list_for_movie(&self, movie_id: Uuid) -> AppResult<Vec<Showtime>> {
        self.uow.showtimes().list_by_movie(movie_id).await
    }

    async fn get_showtime(&self, id: Uuid) -> AppResult<Showtime> {
        self.uow
            .showtimes()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Showtime")
    }
}
