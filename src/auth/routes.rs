// src/auth/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the auth router with login and session routes
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/me", get(handlers::me))
}
