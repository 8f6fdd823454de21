use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Highest rating a review may carry (ratings run 0..=MAX_RATING)
pub const MAX_RATING: i64 = 4;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub provider_id: String,
    pub rating: i64,
    pub comments: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Review list row with the joined provider and service name columns
///
/// The service name is derived through the review's provider, matching
/// the computed column the back-office list shows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReviewListItem {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub provider_id: String,
    pub provider_name: String,
    pub service_name: String,
    pub rating: i64,
    pub comments: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub provider_id: String,
    pub rating: i64,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i64>,
    pub comments: Option<String>,
}

/// Query parameters for the review list view
#[derive(Debug, Deserialize)]
pub struct ReviewQueryParams {
    pub rating: Option<i64>,
    pub provider_id: Option<String>,
    /// Free-text search over review comments
    pub q: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewListItem>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
