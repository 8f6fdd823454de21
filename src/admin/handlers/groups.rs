// src/admin/handlers/groups.rs

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::admin::models::{CreateGroupRequest, Group};
use crate::auth::AuthedUser;
use crate::common::{generate_group_id, is_allowed, Action, ApiError, AppState, Entity};

/// GET /api/admin/groups - List auth groups
pub async fn list_groups(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
) -> Result<Json<Vec<Group>>, ApiError> {
    let state = state_lock.read().await.clone();

    let groups = sqlx::query_as::<_, Group>("SELECT * FROM groups ORDER BY name COLLATE NOCASE")
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(groups))
}

/// POST /api/admin/groups - Create an auth group (superuser only)
pub async fn create_group(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    if !is_allowed(Entity::Group, Action::Add, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            "Group creation denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    if request.name.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "name: Group name is required".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();
    let group_id = generate_group_id();

    sqlx::query("INSERT INTO groups (id, name) VALUES (?, ?)")
        .bind(&group_id)
        .bind(request.name.trim())
        .execute(&state.db)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ApiError::ValidationError("name: Group name already exists".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

    let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
        .bind(&group_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        admin_user_id = %authed.id,
        group_id = %group_id,
        group_name = %group.name,
        "Group created successfully"
    );

    Ok((StatusCode::CREATED, Json(group)))
}

/// DELETE /api/admin/groups/:id - Delete an auth group (superuser only)
pub async fn delete_group(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(group_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !is_allowed(Entity::Group, Action::Delete, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            group_id = %group_id,
            "Group deletion denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(&group_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Group not found: {}", group_id)));
    }

    info!(
        admin_user_id = %authed.id,
        group_id = %group_id,
        "Group deleted successfully"
    );

    Ok(StatusCode::NO_CONTENT)
}
