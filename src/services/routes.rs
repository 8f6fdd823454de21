use super::handlers;
use axum::{routing::get, Router};

/// Creates the services router with all service CRUD routes
pub fn services_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/services",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route(
            "/api/admin/services/:id",
            get(handlers::get_service_by_id)
                .put(handlers::update_service)
                .delete(handlers::delete_service),
        )
}
