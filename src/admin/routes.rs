// src/admin/routes.rs

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers;

pub fn admin_routes() -> Router {
    Router::new()
        // Navigation index with fixed section ordering
        .route(
            "/api/admin/navigation",
            get(handlers::navigation::get_navigation),
        )
        // User account management endpoints
        .route(
            "/api/admin/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/admin/users/:id",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        // Auth group endpoints
        .route(
            "/api/admin/groups",
            get(handlers::groups::list_groups).post(handlers::groups::create_group),
        )
        .route(
            "/api/admin/groups/:id",
            delete(handlers::groups::delete_group),
        )
}
