//! API error taxonomy and its mapping onto HTTP status codes.

use crate::api::response::ApiResponse;
use crate::auth::policy::PolicyError;
use crate::auth::user_store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or id, missing or invalid fields
    InvalidInput(String),
    /// Missing, invalid or expired token, or bad credentials
    Unauthorized(String),
    /// Valid token, insufficient role
    Forbidden(String),
    NotFound(String),
    /// Duplicate email
    Conflict(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_body() -> Self {
        ApiError::InvalidInput("Invalid request body".to_string())
    }

    pub fn invalid_user_id() -> Self {
        ApiError::InvalidInput("Invalid user ID".to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::MissingFields | StoreError::InvalidRole => ApiError::InvalidInput(message),
            StoreError::EmailExists | StoreError::EmailTaken => ApiError::Conflict(message),
            StoreError::NotFound(_) => ApiError::NotFound(message),
            StoreError::InvalidCredentials => ApiError::Unauthorized(message),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        let message = err.to_string();
        match err {
            PolicyError::Unauthorized => ApiError::Unauthorized(message),
            PolicyError::Forbidden => ApiError::Forbidden(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::invalid_body()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::Internal(err) => {
                error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            ApiError::InvalidInput(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let cases = [
            (StoreError::MissingFields, StatusCode::BAD_REQUEST),
            (StoreError::InvalidRole, StatusCode::BAD_REQUEST),
            (StoreError::EmailExists, StatusCode::CONFLICT),
            (StoreError::EmailTaken, StatusCode::CONFLICT),
            (StoreError::NotFound(3), StatusCode::NOT_FOUND),
            (StoreError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn test_policy_error_mapping() {
        let unauthorized = ApiError::from(PolicyError::Unauthorized).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let forbidden = ApiError::from(PolicyError::Forbidden).into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = ApiError::Internal(anyhow::anyhow!("signing key exploded"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
