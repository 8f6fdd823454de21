use super::handlers;
use axum::{routing::get, Router};

/// Creates the reviews router with all review CRUD routes
pub fn reviews_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route(
            "/api/admin/reviews/:id",
            get(handlers::get_review_by_id)
                .put(handlers::update_review)
                .delete(handlers::delete_review),
        )
}
