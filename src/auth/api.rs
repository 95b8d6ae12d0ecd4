//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::api::{error::ApiError, response::ApiResponse};
use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, NewUserRequest, User},
    user_store::UserStore,
};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /api/register
pub async fn register(
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

    info!("📝 Registered user {} ({})", user.email, user.role);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user).with_message("User registered successfully")),
    ))
}

/// Login endpoint - POST /api/login
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(payload) = payload?;

    let user = state
        .user_store
        .verify_credentials(&payload.email, &payload.password)
        .map_err(|e| {
            warn!("❌ Failed login attempt: {}", payload.email);
            ApiError::from(e)
        })?;

    let (token, expires_in) = state
        .jwt_handler
        .generate_token(&user)
        .map_err(|e| ApiError::Internal(e.context("Failed to generate token")))?;

    info!("✅ Login successful: {} ({})", user.email, user.role);

    Ok(Json(ApiResponse::token(token, expires_in)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;

    fn test_state() -> AuthState {
        AuthState::new(
            Arc::new(UserStore::new()),
            Arc::new(JwtHandler::new("test-secret".to_string())),
        )
    }

    fn new_user(email: &str, role: &str) -> NewUserRequest {
        NewUserRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "p".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let state = test_state();

        let (status, Json(body)) = register(State(state.clone()), Ok(Json(new_user("a@x.com", "user"))))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.data.as_ref().map(|u| u.id), Some(1));

        let Json(body) = login(
            State(state.clone()),
            Ok(Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })),
        )
        .await
        .unwrap();

        let claims = state
            .jwt_handler
            .validate_token(body.token.as_deref().unwrap())
            .unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let state = test_state();

        register(State(state.clone()), Ok(Json(new_user("a@x.com", "user"))))
            .await
            .unwrap();
        let err = register(State(state.clone()), Ok(Json(new_user("a@x.com", "admin"))))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(state.user_store.len(), 1);
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let state = test_state();

        let err = login(
            State(state),
            Ok(Json(LoginRequest {
                email: "ghost@x.com".to_string(),
                password: "p".to_string(),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
