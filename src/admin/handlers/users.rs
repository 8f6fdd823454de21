// src/admin/handlers/users.rs

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::admin::models::{CreateUserRequest, UpdateUserRequest};
use crate::auth::passwords::hash_password;
use crate::auth::{AuthedUser, User};
use crate::common::{generate_user_id, is_allowed, Action, ApiError, AppState, Entity};

/// GET /api/admin/users - List user accounts (superuser only)
pub async fn list_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<User>>, ApiError> {
    // Listing accounts is management, not navigation viewing, so it
    // takes the same superuser gate as mutation
    if !is_allowed(Entity::User, Action::Change, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            "User list access denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let state = state_lock.read().await.clone();

    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY date_joined DESC")
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        admin_user_id = %authed.id,
        user_count = users.len(),
        "User list fetched successfully"
    );

    Ok(Json(users))
}

/// POST /api/admin/users - Create a user account (superuser only)
pub async fn create_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if !is_allowed(Entity::User, Action::Add, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            "User creation denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    if request.username.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "username: Username is required".to_string(),
        ));
    }
    if request.username.len() > 150 {
        return Err(ApiError::ValidationError(
            "username: Username must be less than 150 characters".to_string(),
        ));
    }
    if request.password.len() < 8 {
        return Err(ApiError::ValidationError(
            "password: Password must be at least 8 characters".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();

    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::InternalServer(format!("password hashing failed: {}", e)))?;
    let user_id = generate_user_id();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, email, first_name, last_name,
                           is_superuser, is_staff, is_active, date_joined)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, datetime('now'))
        "#,
    )
    .bind(&user_id)
    .bind(request.username.trim())
    .bind(&password_hash)
    .bind(request.email.as_deref())
    .bind(request.first_name.as_deref())
    .bind(request.last_name.as_deref())
    .bind(request.is_superuser.unwrap_or(false) as i64)
    .bind(request.is_staff.unwrap_or(false) as i64)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::ValidationError("username: Username already exists".to_string())
        } else {
            ApiError::DatabaseError(e)
        }
    })?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        admin_user_id = %authed.id,
        created_user_id = %user_id,
        username = %user.username,
        is_superuser = user.is_superuser != 0,
        "User created successfully"
    );

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/admin/users/:id - Update a user account (superuser only)
///
/// Usernames are fixed at creation; the update covers contact fields,
/// flags, and password resets.
pub async fn update_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(target_user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if !is_allowed(Entity::User, Action::Change, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            target_user_id = %target_user_id,
            "User update denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    // A superuser cannot lock themselves out
    if target_user_id == authed.id {
        if request.is_superuser == Some(false) {
            return Err(ApiError::BadRequest(
                "Cannot remove your own superuser flag".to_string(),
            ));
        }
        if request.is_active == Some(false) {
            return Err(ApiError::BadRequest(
                "Cannot deactivate your own account".to_string(),
            ));
        }
    }

    if let Some(password) = &request.password {
        if password.len() < 8 {
            return Err(ApiError::ValidationError(
                "password: Password must be at least 8 characters".to_string(),
            ));
        }
    }

    let state = state_lock.read().await.clone();

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(&target_user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if existing == 0 {
        return Err(ApiError::NotFound(format!(
            "User not found: {}",
            target_user_id
        )));
    }

    let password_hash = match &request.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| ApiError::InternalServer(format!("password hashing failed: {}", e)))?,
        ),
        None => None,
    };

    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = COALESCE(?, password_hash),
            email = COALESCE(?, email),
            first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            is_superuser = COALESCE(?, is_superuser),
            is_staff = COALESCE(?, is_staff),
            is_active = COALESCE(?, is_active)
        WHERE id = ?
        "#,
    )
    .bind(password_hash.as_deref())
    .bind(request.email.as_deref())
    .bind(request.first_name.as_deref())
    .bind(request.last_name.as_deref())
    .bind(request.is_superuser.map(|v| v as i64))
    .bind(request.is_staff.map(|v| v as i64))
    .bind(request.is_active.map(|v| v as i64))
    .bind(&target_user_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&target_user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        admin_user_id = %authed.id,
        target_user_id = %target_user_id,
        "User updated successfully"
    );

    Ok(Json(user))
}

/// DELETE /api/admin/users/:id - Delete a user account (superuser only)
///
/// Deletion cascades to everything the user owns: their services,
/// providers, and reviews.
pub async fn delete_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(target_user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !is_allowed(Entity::User, Action::Delete, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            target_user_id = %target_user_id,
            "User deletion denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    if target_user_id == authed.id {
        warn!(
            user_id = %authed.id,
            "User deletion failed: cannot delete self"
        );
        return Err(ApiError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&target_user_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "User not found: {}",
            target_user_id
        )));
    }

    info!(
        admin_user_id = %authed.id,
        target_user_id = %target_user_id,
        "User deleted successfully"
    );

    Ok(StatusCode::NO_CONTENT)
}
