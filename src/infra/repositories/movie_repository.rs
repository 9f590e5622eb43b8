//! Movie repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::entities::movie::{self, Entity as MovieEntity};
use crate::domain::Movie;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies, newest first
    async fn list(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>>;
}

pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        let models = MovieEntity::find()
            .order_by_desc(movie::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        let model = MovieEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Movie::from))
    }
}
