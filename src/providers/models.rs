use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub service_id: String,
    pub created_by: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Provider list row with the joined service name column
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProviderListItem {
    pub id: String,
    pub name: String,
    pub service_id: String,
    pub service_name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProviderRequest {
    pub name: String,
    pub service_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProviderRequest {
    pub name: Option<String>,
    pub service_id: Option<String>,
}

/// Query parameters for the provider list view
///
/// Date bounds compare against the stored `datetime('now')` text
/// timestamps, so "YYYY-MM-DD" and full "YYYY-MM-DD HH:MM:SS" both
/// work.
#[derive(Debug, Deserialize)]
pub struct ProviderQueryParams {
    pub service_id: Option<String>,
    /// Free-text search over provider name and service name
    pub q: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ProviderListResponse {
    pub providers: Vec<ProviderListItem>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
