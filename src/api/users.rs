//! User management endpoints.
//!
//! Reads sit behind the `Authenticated` gate, mutations behind `AdminOnly`;
//! both gates are applied as route layers in [`crate::api::routes`].

use crate::api::{error::ApiError, response::ApiResponse};
use crate::auth::{
    models::{NewUserRequest, User, UserPatch},
    AuthState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

fn parse_user_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| ApiError::invalid_user_id())
}

/// GET /api/users
pub async fn list_users(State(state): State<AuthState>) -> Json<ApiResponse<Vec<User>>> {
    let users = state.user_store.list();
    let count = users.len();

    Json(ApiResponse::success(users).with_count(count))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AuthState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.user_store.get_by_id(id)?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/users
///
/// Applies the same field validation as registration.
pub async fn create_user(
    State(state): State<AuthState>,
    payload: Result<Json<NewUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let Json(payload) = payload?;

    let user = state.user_store.create(
        &payload.name,
        &payload.email,
        &payload.password,
        &payload.role,
    )?;

    info!("👤 Admin created user {} ({})", user.email, user.role);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user).with_message("User created successfully")),
    ))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AuthState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = parse_user_id(&id)?;
    let Json(patch) = payload?;

    let user = state.user_store.update(id, &patch)?;

    info!("✏️  Admin updated user {}", user.id);

    Ok(Json(
        ApiResponse::success(user).with_message("User updated successfully"),
    ))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AuthState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    state.user_store.delete(id)?;

    Ok(Json(ApiResponse::ok("User deleted successfully")))
}
