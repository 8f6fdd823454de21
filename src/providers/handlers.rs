use super::models::{
    CreateProviderRequest, MessageResponse, Provider, ProviderListItem, ProviderListResponse,
    ProviderQueryParams, UpdateProviderRequest,
};
use super::validators::ProviderValidator;
use crate::auth::AuthedUser;
use crate::common::{
    generate_provider_id, is_allowed, Action, ApiError, AppState, Entity, Validator,
};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// GET /api/admin/providers - List providers (filters, search, pagination)
///
/// List columns mirror the back-office table: name, service name,
/// created_at, updated_at. Filters: service, created/updated ranges.
/// Search covers provider name and service name.
pub async fn list_providers(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Query(params): Query<ProviderQueryParams>,
) -> Result<Json<ProviderListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    // Build the filter clauses dynamically; every clause binds a
    // string parameter in order
    let mut clauses: Vec<&str> = Vec::new();
    let mut bind_params: Vec<String> = Vec::new();

    if let Some(service_id) = params.service_id.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("p.service_id = ?");
        bind_params.push(service_id.to_string());
    }
    if let Some(created_after) = params.created_after.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("p.created_at >= ?");
        bind_params.push(created_after.to_string());
    }
    if let Some(created_before) = params.created_before.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("p.created_at <= ?");
        bind_params.push(created_before.to_string());
    }
    if let Some(updated_after) = params.updated_after.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("p.updated_at >= ?");
        bind_params.push(updated_after.to_string());
    }
    if let Some(updated_before) = params.updated_before.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("p.updated_at <= ?");
        bind_params.push(updated_before.to_string());
    }
    if let Some(q) = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        let pattern = format!("%{}%", q);
        clauses.push("(p.name LIKE ? OR s.name LIKE ?)");
        bind_params.push(pattern.clone());
        bind_params.push(pattern);
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count_sql = format!(
        "SELECT COUNT(*) FROM providers p JOIN services s ON s.id = p.service_id{}",
        where_sql
    );
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for param in &bind_params {
        count_query = count_query.bind(param.clone());
    }
    let total = count_query
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let list_sql = format!(
        r#"SELECT p.id, p.name, p.service_id, s.name AS service_name, p.created_at, p.updated_at
        FROM providers p
        JOIN services s ON s.id = p.service_id{}
        ORDER BY p.created_at DESC
        LIMIT ? OFFSET ?"#,
        where_sql
    );
    let mut list_query = sqlx::query_as::<_, ProviderListItem>(&list_sql);
    for param in &bind_params {
        list_query = list_query.bind(param.clone());
    }
    let providers = list_query
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    debug!(
        provider_count = providers.len(),
        total = total,
        page = page,
        limit = limit,
        "Successfully loaded paginated provider list"
    );

    Ok(Json(ProviderListResponse {
        providers,
        total: total as usize,
        page,
        page_size: limit,
    }))
}

/// POST /api/admin/providers - Create a new provider
pub async fn create_provider(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_allowed(Entity::Provider, Action::Add, &authed.actor(), None) {
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let validation = ProviderValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation.errors,
            "Provider creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    // The referenced service must exist
    let service_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = ?")
        .bind(&request.service_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if service_exists == 0 {
        return Err(ApiError::ValidationError(
            "service_id: Service does not exist".to_string(),
        ));
    }

    let provider_id = generate_provider_id();

    // created_by is stamped from the acting user, never from the request
    sqlx::query(
        r#"
        INSERT INTO providers (id, name, service_id, created_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, datetime('now'), datetime('now'))
        "#,
    )
    .bind(&provider_id)
    .bind(request.name.trim())
    .bind(&request.service_id)
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let provider = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = ?")
        .bind(&provider_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        username = %authed.username,
        provider_id = %provider_id,
        provider_name = %provider.name,
        service_id = %provider.service_id,
        "Provider created successfully"
    );

    Ok((StatusCode::CREATED, Json(provider)))
}

/// GET /api/admin/providers/:id - Get provider by ID
pub async fn get_provider_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(provider_id): Path<String>,
) -> Result<Json<Provider>, ApiError> {
    let state = state_lock.read().await.clone();

    let provider = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = ?")
        .bind(&provider_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Provider not found: {}", provider_id)))?;

    Ok(Json(provider))
}

/// PUT /api/admin/providers/:id - Update provider (superuser only)
pub async fn update_provider(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(provider_id): Path<String>,
    Json(request): Json<UpdateProviderRequest>,
) -> Result<Json<Provider>, ApiError> {
    if !is_allowed(Entity::Provider, Action::Change, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            provider_id = %provider_id,
            "Provider update denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let validation = ProviderValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM providers WHERE id = ?")
        .bind(&provider_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if existing == 0 {
        return Err(ApiError::NotFound(format!(
            "Provider not found: {}",
            provider_id
        )));
    }

    if let Some(service_id) = &request.service_id {
        let service_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
        if service_exists == 0 {
            return Err(ApiError::ValidationError(
                "service_id: Service does not exist".to_string(),
            ));
        }
    }

    // created_by is immutable: the update never touches the column
    sqlx::query(
        r#"
        UPDATE providers
        SET name = COALESCE(?, name),
            service_id = COALESCE(?, service_id),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.service_id.as_deref())
    .bind(&provider_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let provider = sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = ?")
        .bind(&provider_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        provider_id = %provider_id,
        "Provider updated successfully"
    );

    Ok(Json(provider))
}

/// DELETE /api/admin/providers/:id - Delete provider (superuser only)
///
/// Deletion cascades to the provider's reviews via the schema's
/// foreign keys.
pub async fn delete_provider(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(provider_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !is_allowed(Entity::Provider, Action::Delete, &authed.actor(), None) {
        warn!(
            user_id = %authed.id,
            provider_id = %provider_id,
            "Provider deletion denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let state = state_lock.read().await.clone();

    let review_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE provider_id = ?")
            .bind(&provider_id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    let result = sqlx::query("DELETE FROM providers WHERE id = ?")
        .bind(&provider_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Provider not found: {}",
            provider_id
        )));
    }

    info!(
        user_id = %authed.id,
        provider_id = %provider_id,
        cascaded_reviews = review_count,
        "Provider deleted successfully"
    );

    Ok(Json(MessageResponse {
        message: "Provider deleted successfully".to_string(),
    }))
}
