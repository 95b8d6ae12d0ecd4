//! Authentication Module
//! Mission: Registration, JWT sessions and role-gated access to user data

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use user_store::UserStore;
