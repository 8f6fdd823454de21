use super::handlers;
use axum::{routing::get, Router};

/// Creates the providers router with all provider CRUD routes
pub fn providers_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/providers",
            get(handlers::list_providers).post(handlers::create_provider),
        )
        .route(
            "/api/admin/providers/:id",
            get(handlers::get_provider_by_id)
                .put(handlers::update_provider)
                .delete(handlers::delete_provider),
        )
}
