//! Authentication handlers

use axum::extract::{Extension, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, LoginRequest, LoginResponse, User};
use super::passwords::verify_password;
use crate::common::{ApiError, AppState};

/// POST /api/auth/login
/// Authenticates a user with username and password, returning a JWT
///
/// # Request Body
/// ```json
/// {
///   "username": "alice",
///   "password": "secret"
/// }
/// ```
///
/// # Response
/// ```json
/// {
///   "token": "<jwt token>",
///   "user": { ... }
/// }
/// ```
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // One rejection path for unknown user and bad password, so the
    // response never reveals which usernames exist
    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash) => u,
        _ => {
            warn!(username = %payload.username, "Login failed: invalid credentials");
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    if user.is_active == 0 {
        warn!(user_id = %user.id, "Login failed: account is inactive");
        return Err(ApiError::Unauthorized("account disabled".to_string()));
    }

    sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
        .bind(&user.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let expiration = Utc::now() + Duration::hours(24);
    let claims = Claims {
        sub: user.id.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalServer(format!("token generation failed: {}", e)))?;

    info!(
        user_id = %user.id,
        username = %user.username,
        is_superuser = user.is_superuser != 0,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me - Return the currently authenticated user
pub async fn me(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<User>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::Unauthorized("user not found".to_string()))?;

    Ok(Json(user))
}
