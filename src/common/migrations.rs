// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

use crate::auth::passwords::hash_password;
use crate::common::generate_user_id;

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    // Only drop tables if RESET_DB environment variable is set to "true"
    // This prevents data loss on server restarts
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - Dropping all tables and recreating schema...");
        drop_all_tables(pool).await?;
        info!("Dropped old tables");
    }

    create_account_tables(pool).await?;
    create_catalog_tables(pool).await?;
    create_review_tables(pool).await?;
    create_indexes(pool).await?;

    // Seed a superuser from the environment on first boot
    bootstrap_superuser(pool).await?;

    info!("Database migration completed successfully");

    Ok(())
}

/// Drop all tables in reverse dependency order
async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS reviews").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS providers").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS services").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS groups").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS users").execute(pool).await?;
    Ok(())
}

/// Users and auth groups
async fn create_account_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            email TEXT,
            first_name TEXT,
            last_name TEXT,
            is_superuser INTEGER NOT NULL DEFAULT 0,
            is_staff INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            date_joined TEXT DEFAULT (datetime('now')),
            last_login TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Services and the providers grouped under them
///
/// Referential integrity is enforced by the schema: deleting a service
/// removes its providers, and deleting a provider removes its reviews.
/// The pool enables foreign keys on every connection.
async fn create_catalog_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_by TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS providers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            service_id TEXT NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            created_by TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Reviews left by users against providers
async fn create_review_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            provider_id TEXT NOT NULL REFERENCES providers(id) ON DELETE CASCADE,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 0 AND 4),
            comments TEXT NOT NULL,
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Indexes for list filters and lookups
async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = vec![
        "CREATE INDEX IF NOT EXISTS idx_providers_service_id ON providers(service_id)",
        "CREATE INDEX IF NOT EXISTS idx_providers_created_by ON providers(created_by)",
        "CREATE INDEX IF NOT EXISTS idx_services_created_by ON services(created_by)",
        "CREATE INDEX IF NOT EXISTS idx_reviews_provider_id ON reviews(provider_id)",
        "CREATE INDEX IF NOT EXISTS idx_reviews_user_id ON reviews(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_reviews_rating ON reviews(rating)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}

/// Create the initial superuser from ADMIN_USERNAME/ADMIN_PASSWORD when
/// the users table is empty, so a fresh install has a working login.
async fn bootstrap_superuser(pool: &SqlitePool) -> anyhow::Result<()> {
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count > 0 {
        return Ok(());
    }

    let username = match env::var("ADMIN_USERNAME") {
        Ok(u) if !u.trim().is_empty() => u,
        _ => {
            warn!("Users table is empty and ADMIN_USERNAME is not set; no superuser created");
            return Ok(());
        }
    };
    let password = match env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            warn!("ADMIN_PASSWORD is not set; no superuser created");
            return Ok(());
        }
    };

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
    let user_id = generate_user_id();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, is_superuser, is_staff, is_active, date_joined)
        VALUES (?, ?, ?, 1, 1, 1, datetime('now'))
        "#,
    )
    .bind(&user_id)
    .bind(&username)
    .bind(&password_hash)
    .execute(pool)
    .await?;

    info!(user_id = %user_id, username = %username, "Bootstrapped initial superuser");

    Ok(())
}
