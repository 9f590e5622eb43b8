//! Movie catalog use-cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Movie;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait MovieService: Send + Sync {
    /// All movies, newest first
    async fn list_movies(&self) -> AppResult<Vec<Movie>>;

    async fn get_movie(&self, id: Uuid) -> AppResult<Movie>;
}

pub struct MovieCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MovieCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MovieService for MovieCatalog<U> {
    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.uow.movies().list().await
    }

    async fn get_movie(&self, id: Uuid) -> AppResult<Movie> {
        self.uow.movies().find_by_id(id).await?.ok_or_not_found("Movie")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::repositories::MockMovieRepository;
    use crate::services::test_support::{movie, TestUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_get_movie() {
        let id = Uuid::new_v4();
        let mut repo = MockMovieRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(Movie { id, ..movie("Inception") })));

        let service = MovieCatalog::new(Arc::new(TestUnitOfWork::default().movies(repo)));
        assert_eq!(service.get_movie(id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_missing_movie_is_not_found() {
        let mut repo = MockMovieRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = MovieCatalog::new(Arc::new(TestUnitOfWork::default().movies(repo)));
        let err = service.get_movie(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref e) if e == "Movie"));
    }
}
