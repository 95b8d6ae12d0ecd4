//! Server configuration.
//!
//! Every option can be given as a flag or through the environment (a `.env`
//! file is loaded first by the binary).

use crate::auth::{
    jwt::{DEFAULT_JWT_SECRET, MAX_EXPIRATION_HOURS},
    AuthState, JwtHandler, UserStore,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug, Clone)]
#[command(name = "userbase")]
#[command(about = "In-memory user registry with JWT authentication")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// HS256 signing secret (the default is public; override it)
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in hours
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value = "24")]
    pub token_ttl_hours: i64,

    /// Email of an admin account seeded at startup
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    /// Password of the seeded admin account (stored in plaintext)
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Display name of the seeded admin account
    #[arg(long, env = "ADMIN_NAME", default_value = "admin")]
    pub admin_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            admin_email: None,
            admin_password: None,
            admin_name: "admin".to_string(),
        }
    }
}

impl Config {
    /// Build the shared state: empty store (plus optional admin) and token handler
    pub fn build_state(&self) -> Result<AuthState> {
        if self.token_ttl_hours <= 0 {
            bail!("TOKEN_TTL_HOURS must be positive, got {}", self.token_ttl_hours);
        }
        if self.token_ttl_hours > MAX_EXPIRATION_HOURS {
            bail!(
                "TOKEN_TTL_HOURS must be at most {}, got {}",
                MAX_EXPIRATION_HOURS,
                self.token_ttl_hours
            );
        }

        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("⚠️  Using the built-in JWT secret. Set JWT_SECRET in production!");
        }

        let user_store = Arc::new(UserStore::new());

        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => {
                user_store
                    .bootstrap_admin(&self.admin_name, email, password)
                    .context("Failed to seed admin user")?;
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("ADMIN_EMAIL and ADMIN_PASSWORD must both be set to seed an admin");
            }
            (None, None) => {}
        }

        let jwt_handler = Arc::new(
            JwtHandler::new(self.jwt_secret.clone()).with_expiration_hours(self.token_ttl_hours),
        );

        info!(
            "🔐 Authentication initialized ({} users, {}h tokens)",
            user_store.len(),
            jwt_handler.expiration_hours()
        );

        Ok(AuthState::new(user_store, jwt_handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::UserRole;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = Config::try_parse_from(["userbase"]).unwrap();
        let default = Config::default();

        assert_eq!(parsed.bind, default.bind);
        assert_eq!(parsed.token_ttl_hours, default.token_ttl_hours);
        assert_eq!(parsed.admin_name, default.admin_name);
    }

    #[test]
    fn test_build_state_seeds_admin() {
        let config = Config {
            admin_email: Some("root@x.com".to_string()),
            admin_password: Some("pw".to_string()),
            ..Default::default()
        };

        let state = config.build_state().unwrap();
        let admin = state.user_store.verify_credentials("root@x.com", "pw").unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.id, 1);
    }

    #[test]
    fn test_build_state_without_admin_is_empty() {
        let state = Config::default().build_state().unwrap();
        assert!(state.user_store.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let config = Config {
            token_ttl_hours: 0,
            ..Default::default()
        };
        assert!(config.build_state().is_err());
    }

    #[test]
    fn test_rejects_oversized_ttl() {
        let config = Config {
            token_ttl_hours: i64::MAX / 2,
            ..Default::default()
        };
        assert!(config.build_state().is_err());

        let config = Config {
            token_ttl_hours: MAX_EXPIRATION_HOURS,
            ..Default::default()
        };
        assert!(config.build_state().is_ok());
    }
}
