//! Userbase Library
//!
//! In-memory user registry behind a JWT-authenticated HTTP API.
//! Exposes the router and its building blocks for the server binary and tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;

pub use api::create_router;
pub use config::Config;
