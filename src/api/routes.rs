use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{
    api as auth_api, auth_middleware, middleware::enforce_gate, policy::Gate, AuthState,
};
use crate::middleware::request_logging_simple;

use super::users;

/// Create the API router
pub fn create_router(state: AuthState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(auth_api::register))
        .route("/api/login", post(auth_api::login));

    // Any valid token
    let read_routes = Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users/:id", get(users::get_user))
        .route_layer(middleware::from_fn_with_state(
            Gate::Authenticated,
            enforce_gate,
        ));

    // Admin role required
    let admin_routes = Router::new()
        .route("/api/users", post(users::create_user))
        .route(
            "/api/users/:id",
            put(users::update_user).delete(users::delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            Gate::AdminOnly,
            enforce_gate,
        ));

    // Token validation runs before either gate
    let protected_routes = Router::new()
        .merge(read_routes)
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_logging_simple))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}
