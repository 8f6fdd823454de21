use super::models::{
    CreateReviewRequest, MessageResponse, Review, ReviewListItem, ReviewListResponse,
    ReviewQueryParams, UpdateReviewRequest,
};
use super::validators::ReviewValidator;
use crate::auth::AuthedUser;
use crate::common::{
    generate_review_id, is_allowed, Action, ApiError, AppState, Entity, Validator,
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

/// GET /api/admin/reviews - List reviews (filters, search, pagination)
///
/// List columns mirror the back-office table: provider, service
/// (derived via the provider), rating, updated_at, comments. Filters:
/// rating, provider, created/updated ranges. Search covers comments.
pub async fn list_reviews(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Query(params): Query<ReviewQueryParams>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let mut clauses: Vec<&str> = Vec::new();
    let mut bind_params: Vec<String> = Vec::new();

    if let Some(rating) = params.rating {
        clauses.push("r.rating = ?");
        bind_params.push(rating.to_string());
    }
    if let Some(provider_id) = params.provider_id.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("r.provider_id = ?");
        bind_params.push(provider_id.to_string());
    }
    if let Some(created_after) = params.created_after.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("r.created_at >= ?");
        bind_params.push(created_after.to_string());
    }
    if let Some(created_before) = params.created_before.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("r.created_at <= ?");
        bind_params.push(created_before.to_string());
    }
    if let Some(updated_after) = params.updated_after.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("r.updated_at >= ?");
        bind_params.push(updated_after.to_string());
    }
    if let Some(updated_before) = params.updated_before.as_deref().filter(|s| !s.is_empty()) {
        clauses.push("r.updated_at <= ?");
        bind_params.push(updated_before.to_string());
    }
    if let Some(q) = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        clauses.push("r.comments LIKE ?");
        bind_params.push(format!("%{}%", q));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count_sql = format!(
        r#"SELECT COUNT(*)
        FROM reviews r
        JOIN providers p ON p.id = r.provider_id
        JOIN services s ON s.id = p.service_id
        JOIN users u ON u.id = r.user_id{}"#,
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
        r#"SELECT r.id, r.user_id, u.username, r.provider_id, p.name AS provider_name,
            s.name AS service_name, r.rating, r.comments, r.created_at, r.updated_at
        FROM reviews r
        JOIN providers p ON p.id = r.provider_id
        JOIN services s ON s.id = p.service_id
        JOIN users u ON u.id = r.user_id{}
        ORDER BY r.updated_at DESC
        LIMIT ? OFFSET ?"#,
        where_sql
    );
    let mut list_query = sqlx::query_as::<_, ReviewListItem>(&list_sql);
    for param in &bind_params {
        list_query = list_query.bind(param.clone());
    }
    let reviews = list_query
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    debug!(
        review_count = reviews.len(),
        total = total,
        page = page,
        limit = limit,
        "Successfully loaded paginated review list"
    );

    Ok(Json(ReviewListResponse {
        reviews,
        total: total as usize,
        page,
        page_size: limit,
    }))
}

/// POST /api/admin/reviews - Create a new review
pub async fn create_review(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_allowed(Entity::Review, Action::Add, &authed.actor(), None) {
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    let validation = ReviewValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            user_id = %authed.id,
            errors = ?validation.errors,
            "Review creation validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    // The reviewed provider must exist
    let provider_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM providers WHERE id = ?")
        .bind(&request.provider_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if provider_exists == 0 {
        return Err(ApiError::ValidationError(
            "provider_id: Provider does not exist".to_string(),
        ));
    }

    let review_id = generate_review_id();

    // user_id is stamped from the acting user, never from the request
    sqlx::query(
        r#"
        INSERT INTO reviews (id, user_id, provider_id, rating, comments, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'), datetime('now'))
        "#,
    )
    .bind(&review_id)
    .bind(&authed.id)
    .bind(&request.provider_id)
    .bind(request.rating)
    .bind(request.comments.trim())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(&review_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        username = %authed.username,
        review_id = %review_id,
        provider_id = %review.provider_id,
        rating = review.rating,
        "Review created successfully"
    );

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/admin/reviews/:id - Get review by ID
pub async fn get_review_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(review_id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    let state = state_lock.read().await.clone();

    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(&review_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Review not found: {}", review_id)))?;

    Ok(Json(review))
}

/// PUT /api/admin/reviews/:id - Update review (author only)
pub async fn update_review(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(review_id): Path<String>,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<Review>, ApiError> {
    let validation = ReviewValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let state = state_lock.read().await.clone();

    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(&review_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Review not found: {}", review_id)))?;

    if !is_allowed(
        Entity::Review,
        Action::Change,
        &authed.actor(),
        Some(&review.user_id),
    ) {
        warn!(
            user_id = %authed.id,
            review_id = %review_id,
            "Review update denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    // user_id is immutable: the update never touches the column
    sqlx::query(
        r#"
        UPDATE reviews
        SET rating = COALESCE(?, rating),
            comments = COALESCE(?, comments),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(request.rating)
    .bind(request.comments.as_deref().map(str::trim))
    .bind(&review_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(&review_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        review_id = %review_id,
        "Review updated successfully"
    );

    Ok(Json(review))
}

/// DELETE /api/admin/reviews/:id - Delete review (author only)
pub async fn delete_review(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(review_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(&review_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Review not found: {}", review_id)))?;

    if !is_allowed(
        Entity::Review,
        Action::Delete,
        &authed.actor(),
        Some(&review.user_id),
    ) {
        warn!(
            user_id = %authed.id,
            review_id = %review_id,
            "Review deletion denied"
        );
        return Err(ApiError::Forbidden("permission denied".to_string()));
    }

    sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(&review_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %authed.id,
        review_id = %review_id,
        "Review deleted successfully"
    );

    Ok(Json(MessageResponse {
        message: "Review deleted successfully".to_string(),
    }))
}
