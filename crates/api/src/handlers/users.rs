//! Handlers for the `/users` resource.
//!
//! Users edit their own profile under `/users/me`; everything addressed by id
//! is admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reportflow_core::roles::Role;
use reportflow_core::types::{deserialize_nullable, DepartmentId, UserId};
use reportflow_core::user::{ChangePasswordInput, UpdateUserInput, User, UserSearchCriteria};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /users/me`. Role and activation are not self-service.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub department_id: Option<DepartmentId>,
    /// `null` removes the manager; omitting the field keeps it.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub manager_id: Option<Option<UserId>>,
    pub external_chat_id: Option<String>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<DepartmentId>,
    /// `null` removes the manager; omitting the field keeps it.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub manager_id: Option<Option<UserId>>,
    pub is_active: Option<bool>,
    pub external_chat_id: Option<String>,
}

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Self-service
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = state.users.get_user(&auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    input.validate()?;

    let update = UpdateUserInput {
        email: input.email,
        name: input.name,
        role: None,
        department_id: input.department_id,
        manager_id: input.manager_id,
        is_active: None,
        external_chat_id: input.external_chat_id,
    };
    let user = state.users.update_user(&auth.user_id, update).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;

    state
        .users
        .change_password(
            &auth.user_id,
            ChangePasswordInput {
                current_password: input.current_password,
                new_password: input.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/me/subordinates
pub async fn subordinates(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = state.users.list_subordinates(&auth.user_id).await?;
    Ok(Json(DataResponse { data: users }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(criteria): Query<UserSearchCriteria>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = state.users.search_users(criteria).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = state.users.get_user(&id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    input.validate()?;

    let update = UpdateUserInput {
        email: input.email,
        name: input.name,
        role: input.role,
        department_id: input.department_id,
        manager_id: input.manager_id,
        is_active: input.is_active,
        external_chat_id: input.external_chat_id,
    };
    let user = state.users.update_user(&id, update).await?;
    tracing::info!(user_id = %user.id, admin_id = %admin.user_id, "User updated by admin");
    Ok(Json(DataResponse { data: user }))
}
