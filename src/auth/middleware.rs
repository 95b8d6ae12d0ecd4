//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation and role gates

use crate::api::error::ApiError;
use crate::auth::{
    jwt::JwtHandler,
    models::Claims,
    policy::{authorize, Gate},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates JWT tokens
///
/// On success the decoded [`Claims`] are stored in the request extensions.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req)?;

    let claims = jwt_handler.validate_token(token).map_err(|e| {
        debug!("Rejected token: {:#}", e);
        AuthError::InvalidToken
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Gate middleware; runs after [`auth_middleware`] has attached claims
pub async fn enforce_gate(
    State(gate): State<Gate>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(extract_claims(&req), gate)?;

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)
}

/// Extract claims from request (use after auth middleware)
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Auth error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = match err {
            AuthError::MissingToken => "Missing or invalid Authorization header",
            AuthError::InvalidToken => "Invalid or expired token",
        };
        ApiError::Unauthorized(message.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
