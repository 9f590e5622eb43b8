//! User repository.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// # Errors
    /// `Conflict` when the e-mail is already registered, including a
    /// registration that raced past `find_by_email`.
    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User>;
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let new_user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            created_at: now,
            updated_at: now,
        };

        let inserted = UserEntity::insert(ActiveModel {
            id: Set(new_user.id),
            email: Set(new_user.email.clone()),
            password_hash: Set(new_user.password_hash.clone()),
            name: Set(new_user.name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
        .exec_without_returning(&self.db)
        .await?;

        if inserted == 0 {
            return Err(AppError::conflict("User with this email"));
        }

        Ok(new_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_returns_new_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();
        let store = UserStore::new(db);

        let user = store
            .create(
                "jane@example.com".to_string(),
                "$argon2id$hash".to_string(),
                "Jane".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.created_at, user.updated_at);

        let log = store.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = &log[0].statements()[0].sql;
        assert!(sql.starts_with(r#"INSERT INTO "users""#));
        assert!(sql.contains(r#"ON CONFLICT ("email") DO NOTHING"#));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        // A concurrent registration already holds the e-mail.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();

        let err = UserStore::new(db)
            .create(
                "jane@example.com".to_string(),
                "$argon2id$hash".to_string(),
                "Jane".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.code(), "CONFLICT");
    }
}
