//! Tests for reviews module
//!
//! These tests verify core review functionality including:
//! - Review model structure
//! - Rating bounds and comment validation
//! - Author stamping against a real database

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::AuthedUser;
    use crate::common::migrations::run_migrations;
    use crate::common::{AppState, SiteConfig, Validator};
    use axum::extract::{Extension, Path};
    use axum::Json;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use validators::ReviewValidator;

    async fn setup_state() -> Arc<RwLock<AppState>> {
        // In-memory SQLite with foreign keys on, same as the server pool
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();

        Arc::new(RwLock::new(AppState {
            db: pool,
            jwt_secret: "test-secret".to_string(),
            site: SiteConfig {
                site_header: "Secret PR".to_string(),
                site_title: "Secret PR".to_string(),
                index_title: "Admin".to_string(),
            },
        }))
    }

    fn valid_request() -> models::CreateReviewRequest {
        models::CreateReviewRequest {
            provider_id: "P_K7NP3X".to_string(),
            rating: 3,
            comments: "Quick turnaround, fair price.".to_string(),
        }
    }

    #[test]
    fn test_review_model_structure() {
        let review = models::Review {
            id: "R_K7NP3X".to_string(),
            user_id: "U_8MWQT2".to_string(),
            provider_id: "P_XY12AB".to_string(),
            rating: 4,
            comments: "Excellent work.".to_string(),
            created_at: Some("2024-01-01 00:00:00".to_string()),
            updated_at: Some("2024-01-01 00:00:00".to_string()),
        };

        assert_eq!(review.rating, 4);
        assert_eq!(review.user_id, "U_8MWQT2");
    }

    #[test]
    fn test_create_review_validation_success() {
        let result = ReviewValidator.validate(&valid_request());
        assert!(result.is_valid, "Valid review should pass validation");
    }

    #[test]
    fn test_every_rating_in_range_is_accepted() {
        for rating in 0..=models::MAX_RATING {
            let mut request = valid_request();
            request.rating = rating;
            let result = ReviewValidator.validate(&request);
            assert!(result.is_valid, "Rating {} should be accepted", rating);
        }
    }

    #[test]
    fn test_rating_above_maximum_is_rejected() {
        let mut request = valid_request();
        request.rating = 5;

        let result = ReviewValidator.validate(&request);
        assert!(!result.is_valid, "Rating 5 should be rejected");
        assert!(result.errors.iter().any(|e| e.field == "rating"));
    }

    #[test]
    fn test_negative_rating_is_rejected() {
        let mut request = valid_request();
        request.rating = -1;

        let result = ReviewValidator.validate(&request);
        assert!(!result.is_valid, "Negative rating should be rejected");
        assert!(result.errors.iter().any(|e| e.field == "rating"));
    }

    #[test]
    fn test_blank_comments_are_rejected() {
        let mut request = valid_request();
        request.comments = "   ".to_string();

        let result = ReviewValidator.validate(&request);
        assert!(!result.is_valid, "Blank comments should be rejected");
        assert!(result.errors.iter().any(|e| e.field == "comments"));
    }

    #[test]
    fn test_missing_provider_is_rejected() {
        let mut request = valid_request();
        request.provider_id = "".to_string();

        let result = ReviewValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "provider_id"));
    }

    #[test]
    fn test_update_review_validation_partial() {
        let request = models::UpdateReviewRequest {
            rating: Some(2),
            comments: None,
        };

        let result = ReviewValidator.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_update_review_validation_out_of_range_rating() {
        let request = models::UpdateReviewRequest {
            rating: Some(9),
            comments: None,
        };

        let result = ReviewValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "rating"));
    }

    #[test]
    fn test_review_list_item_derives_service_through_provider() {
        let item = models::ReviewListItem {
            id: "R_K7NP3X".to_string(),
            user_id: "U_8MWQT2".to_string(),
            username: "alice".to_string(),
            provider_id: "P_XY12AB".to_string(),
            provider_name: "Acme Pipes".to_string(),
            service_name: "Plumbing".to_string(),
            rating: 3,
            comments: "Good.".to_string(),
            created_at: None,
            updated_at: None,
        };

        assert_eq!(item.provider_name, "Acme Pipes");
        assert_eq!(item.service_name, "Plumbing");
    }

    #[tokio::test]
    async fn test_review_update_preserves_author() {
        let state = setup_state().await;
        let db = state.read().await.db.clone();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, is_superuser, is_staff, is_active, date_joined)
            VALUES ('U_AUTHOR1', 'alice', 'hash', 0, 0, 1, datetime('now'))
            "#,
        )
        .execute(&db)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO services (id, name, created_by) VALUES ('S_OWNED01', 'Plumbing', 'U_AUTHOR1')",
        )
        .execute(&db)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO providers (id, name, service_id, created_by) VALUES ('P_OWNED01', 'Acme Pipes', 'S_OWNED01', 'U_AUTHOR1')",
        )
        .execute(&db)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO reviews (id, user_id, provider_id, rating, comments) VALUES ('R_OWNED01', 'U_AUTHOR1', 'P_OWNED01', 2, 'Fine.')",
        )
        .execute(&db)
        .await
        .unwrap();

        let author = AuthedUser {
            id: "U_AUTHOR1".to_string(),
            username: "alice".to_string(),
            is_superuser: false,
        };
        let Json(review) = handlers::update_review(
            Extension(state.clone()),
            author,
            Path("R_OWNED01".to_string()),
            Json(models::UpdateReviewRequest {
                rating: Some(4),
                comments: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(review.rating, 4);
        assert_eq!(review.comments, "Fine.", "Absent comments stay unchanged");
        assert_eq!(
            review.user_id, "U_AUTHOR1",
            "The author stamp must survive updates"
        );
    }
}
