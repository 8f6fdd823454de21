use super::models::{
    CreateServiceRequest, MessageResponse, Service, ServiceListResponse, ServiceQueryParams,
    UpdateServiceRequest,
};
use super::validators::ServiceValidator;
use crate::auth::AuthedUser;
use crate::common::{
    generate_service_id, is_allowed, Action, ApiError, AppState, Entity, Validator,
};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// GET /api/admin/services - List services (search + pagination)
pub async fn list_services(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Query(params): Query<ServiceQueryParams>,
) -> Result<Json<ServiceListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", q));

    let (total, services) = if let Some(pattern) = &search {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE name LIKE ?")
            .bind(pattern)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE name LIKE ? ORDER BY name COLLATE NOCASE LIMIT ? OFFSET ?",
        )
        .bind(pattern)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        (total, services)
    } else {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services ORDER BY name COLLATE NOCASE LIMIT ? OFFSET ?",
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        (total, services)
    };

    Ok(Json(ServiceListResponse {
        services,
        total: total as usize,
        page,
        page_size: limit,
    }))
}

/// POST /api/admin/services - Create a new service
pub async fn create_service(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_allowed(Entity::Service, Action::Add, &authed.actor(), None) {
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let validation = ServiceValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation.errors,
            "Service creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();
    let service_id = generate_service_id();

    // created_by is stamped from the acting user, never from the request
    sqlx::query(
        r#"
        INSERT INTO services (id, name, created_by, created_at, updated_at)
        VALUES (?, ?, ?, datetime('now'), datetime('now'))
        "#,
    )
    .bind(&service_id)
    .bind(request.name.trim())
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
        .bind(&service_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        username = %authed.username,
        service_id = %service_id,
        service_name = %service.name,
        "Service created successfully"
    );

    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/admin/services/:id - Get service by ID
pub async fn get_service_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(service_id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let state = state_lock.read().await.clone();

    let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
        .bind(&service_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Service not found: {}", service_id)))?;

    Ok(Json(service))
}

/// PUT /api/admin/services/:id - Update service (superuser only)
pub async fn update_service(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(service_id): Path<String>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<Service>, ApiError> {
    if !is_allowed(Entity::Service, Action::Change, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            service_id = %service_id,
            "Service update denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let validation = ServiceValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = ?")
        .bind(&service_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if existing == 0 {
        return Err(ApiError::NotFound(format!(
            "Service not found: {}",
            service_id
        )));
    }

    // created_by is immutable: the update never touches the column
    sqlx::query(
        r#"
        UPDATE services
        SET name = COALESCE(?, name),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref().map(str::trim))
    .bind(&service_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
        .bind(&service_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        service_id = %service_id,
        "Service updated successfully"
    );

    Ok(Json(service))
}

/// DELETE /api/admin/services/:id - Delete service (superuser only)
///
/// Deletion cascades to the service's providers and their reviews via
/// the schema's foreign keys.
pub async fn delete_service(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(service_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !is_allowed(Entity::Service, Action::Delete, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            service_id = %service_id,
            "Service deletion denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let state = state_lock.read().await.clone();

    let provider_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM providers WHERE service_id = ?")
            .bind(&service_id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    let result = sqlx::query("DELETE FROM services WHERE id = ?")
        .bind(&service_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Service not found: {}",
            service_id
        )));
    }

    info!(
        user_id = %authed.id,
        service_id = %service_id,
        cascaded_providers = provider_count,
        "Service deleted successfully"
    );

    Ok(Json(MessageResponse {
        message: "Service deleted successfully".to_string(),
    }))
}
