// src/reviews/validators.rs

use super::models::*;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Review Validators
// ============================================================================

pub struct ReviewValidator;

impl Validator<CreateReviewRequest> for ReviewValidator {
    fn validate(&self, data: &CreateReviewRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.provider_id.trim().is_empty() {
            result.add_error("provider_id", "Provider is required");
        }

        check_rating(&mut result, data.rating);
        check_comments(&mut result, &data.comments);

        result
    }
}

impl Validator<UpdateReviewRequest> for ReviewValidator {
    fn validate(&self, data: &UpdateReviewRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(rating) = data.rating {
            check_rating(&mut result, rating);
        }

        if let Some(comments) = &data.comments {
            check_comments(&mut result, comments);
        }

        result
    }
}

fn check_rating(result: &mut ValidationResult, rating: i64) {
    if !(0..=MAX_RATING).contains(&rating) {
        result.add_error("rating", "Rating must be between 0 and 4");
    }
}

fn check_comments(result: &mut ValidationResult, comments: &str) {
    if comments.trim().is_empty() {
        result.add_error("comments", "Comments are required");
    } else if comments.len() > 10000 {
        result.add_error("comments", "Comments must be less than 10000 characters");
    }
}
