//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// User database model
///
/// The password hash never leaves the server: it is skipped during
/// serialization so handlers can return the row directly.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: i64,
    pub is_staff: i64,
    pub is_active: i64,
    pub date_joined: Option<String>,
    pub last_login: Option<String>,
}

/// Login request payload
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with bearer token and the authenticated user
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
