use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One section of the admin navigation index
#[derive(Debug, Clone, Serialize)]
pub struct NavSection {
    pub name: String,
    pub count: i64,
}

/// Navigation index payload: site branding plus ordered sections
#[derive(Serialize)]
pub struct NavigationResponse {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
    pub sections: Vec<NavSection>,
}

/// Auth group database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}
