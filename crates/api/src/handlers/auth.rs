//! Handlers for the `/auth` resource (login, register, refresh).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reportflow_core::error::CoreError;
use reportflow_core::roles::Role;
use reportflow_core::types::DepartmentId;
use reportflow_core::user::{AuthenticateInput, CreateUserInput, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_token, TokenType};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/register`. Self-registered accounts are employees.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub department_id: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Successful authentication response returned by login, register and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let user = state
        .users
        .authenticate(AuthenticateInput {
            email: input.email,
            password: input.password,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(auth_response(&state, user)?))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    let user = state
        .users
        .create_user(CreateUserInput {
            email: input.email,
            password: input.password,
            name: input.name,
            role: Role::Employee,
            department_id: DepartmentId::new(input.department_id),
            manager_id: None,
            external_chat_id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(auth_response(&state, user)?)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The account must
/// still exist and be active.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let claims = validate_token(&input.refresh_token, &state.config.jwt)
        .ok()
        .filter(|c| c.token_type == TokenType::Refresh)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = state.users.get_user(&claims.sub).await.map_err(|e| match e {
        CoreError::NotFound(_) => {
            AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
        }
        other => AppError::Core(other),
    })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    Ok(Json(auth_response(&state, user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(&user.id, &user.email, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = generate_refresh_token(&user.id, &user.email, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user,
    })
}
