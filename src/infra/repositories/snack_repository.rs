//! Snack repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::snack::{self, Entity as SnackEntity};
use crate::domain::Snack;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SnackRepository: Send + Sync {
    /// Available snacks ordered by category then name
    async fn list_available(&self) -> AppResult<Vec<Snack>>;

    /// Snacks with the given ids, available or not
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Snack>>;
}

pub struct SnackStore {
    db: DatabaseConnection,
}

impl SnackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SnackRepository for SnackStore {
    async fn list_available(&self) -> AppResult<Vec<Snack>> {
        let models = SnackEntity::find()
            .filter(snack::Column::Available.eq(true))
            .order_by_asc(snack::Column::Category)
            .order_by_asc(snack::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Snack::from).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Snack>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = SnackEntity::find()
            .filter(snack::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Snack::from).collect())
    }
}
