// Application state shared across all modules

use sqlx::SqlitePool;

/// Branding shown on the admin navigation index
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
}

/// Application state containing the database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub site: SiteConfig,
}
