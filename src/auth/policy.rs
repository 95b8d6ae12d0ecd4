//! Access Policy
//! Mission: Decide whether validated claims satisfy a route's gate

use crate::auth::models::Claims;

/// Named access requirement attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Any validated token
    Authenticated,
    /// A validated token whose role is `admin`
    AdminOnly,
}

/// Policy denial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// No validated claims were presented
    Unauthorized,
    /// Claims are valid but the role is insufficient
    Forbidden,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyError::Unauthorized => write!(f, "Authentication required"),
            PolicyError::Forbidden => write!(f, "Admin access required"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Evaluate `gate` against the request's claims. Pure; no side effects.
pub fn authorize(claims: Option<&Claims>, gate: Gate) -> Result<(), PolicyError> {
    let claims = claims.ok_or(PolicyError::Unauthorized)?;

    match gate {
        Gate::Authenticated => Ok(()),
        Gate::AdminOnly if claims.is_admin() => Ok(()),
        Gate::AdminOnly => Err(PolicyError::Forbidden),
    }
}
