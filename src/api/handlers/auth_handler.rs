//! Authentication handlers.

use axum::{extract::State, response::Json, routing::{get, post}, Extension, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{LoginUser, RegisterUser, UserResponse};
use crate::errors::AppResult;
use crate::services::AuthSession;
use crate::types::{ApiResponse, Created};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes that need a signed-in user
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUser>,
) -> AppResult<Created<UserResponse>> {
    let user = state.auth_service.register(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Signed in", body = AuthSession),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginUser>,
) -> AppResult<Json<ApiResponse<AuthSession>>> {
    let session = state.auth_service.login(payload).await?;
    Ok(Json(ApiResponse::success(session)))
}

/// The signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.auth_service.current_user(current.id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}
