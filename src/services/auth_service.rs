//! Authentication service.
//!
//! Accounts are optional for booking; a signed-in customer can list their
//! own bookings. Passwords are Argon2 hashed, sessions are HS256 JWTs.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{LoginUser, Password, RegisterUser, User, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signed-in user with a bearer token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserResponse,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 3600)]
    pub expires_in: i64,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    /// `Conflict` when the e-mail is already registered.
    async fn register(&self, request: RegisterUser) -> AppResult<User>;

    async fn login(&self, request: LoginUser) -> AppResult<AuthSession>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    async fn current_user(&self, id: Uuid) -> AppResult<User>;
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    fn issue(&self, user: User) -> AppResult<AuthSession> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(AuthSession {
            user: user.into(),
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, request: RegisterUser) -> AppResult<User> {
        let users = self.uow.users();
        if users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict("User with this email"));
        }

        let password_hash = Password::new(&request.password)?.into_string();
        let user = users
            .create(request.email, password_hash, request.name)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, request: LoginUser) -> AppResult<AuthSession> {
        let Some(user) = self.uow.users().find_by_email(&request.email).await? else {
            Password::verify_dummy(&request.password);
            return Err(AppError::InvalidCredentials);
        };

        if !Password::from_hash(user.password_hash.as_str()).verify(&request.password) {
            return Err(AppError::InvalidCredentials);
        }

        self.issue(user)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    async fn current_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockUserRepository;
    use crate::services::test_support::TestUnitOfWork;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    fn config() -> Config {
        Config::builder(SECRET).build().unwrap()
    }

    fn user(email: &str, password_hash: String) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash,
            name: "Jane Doe".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork::default().users(repo)), config())
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "jane@example.com")
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|email, hash, name| {
                email == "jane@example.com" && hash.starts_with("$argon2") && name == "Jane Doe"
            })
            .returning(|email, hash, _| Ok(user(&email, hash)));

        let user = authenticator(repo)
            .register(RegisterUser {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        assert!(Password::from_hash(user.password_hash).verify("correct horse"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(user(email, "hash".to_string()))));
        repo.expect_create().never();

        let err = authenticator(repo)
            .register(RegisterUser {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_losing_race_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_, _, _| Err(AppError::conflict("User with this email")));

        let err = authenticator(repo)
            .register(RegisterUser {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "User with this email already exists");
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let hash = Password::new("correct horse").unwrap().into_string();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |email| Ok(Some(user(email, hash.clone()))));

        let auth = authenticator(repo);
        let session = auth
            .login(LoginUser {
                email: "jane@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 3600);
        let claims = auth.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.email, "jane@example.com");

        let wrong = auth
            .login(LoginUser {
                email: "jane@example.com".to_string(),
                password: "battery staple".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = authenticator(repo)
            .login(LoginUser {
                email: "ghost@example.com".to_string(),
                password: "whatever1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"another-secret-that-is-long-enough-too"),
        )
        .unwrap();

        let auth = authenticator(MockUserRepository::new());
        assert!(matches!(auth.verify_token(&forged), Err(AppError::Jwt(_))));
    }
}
