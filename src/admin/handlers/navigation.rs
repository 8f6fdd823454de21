// src/admin/handlers/navigation.rs
//! Admin navigation index
//!
//! The index groups the registered models into a fixed display order
//! instead of the alphabetical default.

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::admin::models::{NavSection, NavigationResponse};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

/// Fixed ordering of index sections and the table each one counts.
/// Groups(0) < Users(1) < Services(2) < Providers(3) < Reviews(4).
const SECTION_ORDER: [(&str, &str); 5] = [
    ("Groups", "groups"),
    ("Users", "users"),
    ("Services", "services"),
    ("Providers", "providers"),
    ("Reviews", "reviews"),
];

/// GET /api/admin/navigation - Site branding and ordered index sections
pub async fn get_navigation(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<NavigationResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut sections = Vec::with_capacity(SECTION_ORDER.len());
    for (name, table) in SECTION_ORDER {
        // Table names come from the static ordering table above
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        sections.push(NavSection {
            name: name.to_string(),
            count,
        });
    }

    debug!(
        user_id = %authed.id,
        section_count = sections.len(),
        "Loaded admin navigation index"
    );

    Ok(Json(NavigationResponse {
        site_header: state.site.site_header,
        site_title: state.site.site_title,
        index_title: state.site.index_title,
        sections,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_render_in_fixed_order() {
        let names: Vec<&str> = SECTION_ORDER.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["Groups", "Users", "Services", "Providers", "Reviews"]
        );
    }

    #[test]
    fn test_section_positions() {
        let position = |target: &str| {
            SECTION_ORDER
                .iter()
                .position(|(name, _)| *name == target)
                .unwrap()
        };

        assert_eq!(position("Groups"), 0);
        assert_eq!(position("Users"), 1);
        assert_eq!(position("Services"), 2);
        assert_eq!(position("Providers"), 3);
        assert_eq!(position("Reviews"), 4);
    }

    #[test]
    fn test_ordering_is_not_alphabetical() {
        let names: Vec<&str> = SECTION_ORDER.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_ne!(names, sorted, "Navigation order overrides the alphabetical default");
    }
}
