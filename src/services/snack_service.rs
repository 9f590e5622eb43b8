//! Concession menu.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::SnackMenu;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait SnackService: Send + Sync {
    /// Available snacks, flat and grouped by category
    async fn menu(&self) -> AppResult<SnackMenu>;
}

pub struct SnackBar<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SnackBar<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SnackService for SnackBar<U> {
    async fn menu(&self) -> AppResult<SnackMenu> {
        let snacks = self.uow.snacks().list_available().await?;
        Ok(SnackMenu::from_snacks(snacks))
    }
}
