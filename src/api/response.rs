//! JSON response envelope shared by every endpoint.

use serde::Serialize;

/// `{status, data?, message?, count?, token?, expires_in?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = ()> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<usize>, // seconds until expiration
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data: Some(data),
            message: None,
            count: None,
            token: None,
            expires_in: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            data: None,
            message: None,
            count: None,
            token: None,
            expires_in: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::bare("success").with_message(message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::bare("error").with_message(message)
    }

    pub fn token(token: String, expires_in: usize) -> Self {
        Self {
            token: Some(token),
            expires_in: Some(expires_in),
            ..Self::bare("success")
        }
    }
}
