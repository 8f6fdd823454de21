// src/providers/validators.rs

use super::models::*;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Provider Validators
// ============================================================================

pub struct ProviderValidator;

impl Validator<CreateProviderRequest> for ProviderValidator {
    fn validate(&self, data: &CreateProviderRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        check_name(&mut result, &data.name);

        if data.service_id.trim().is_empty() {
            result.add_error("service_id", "Service is required");
        }

        result
    }
}

impl Validator<UpdateProviderRequest> for ProviderValidator {
    fn validate(&self, data: &UpdateProviderRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(name) = &data.name {
            check_name(&mut result, name);
        }

        if let Some(service_id) = &data.service_id {
            if service_id.trim().is_empty() {
                result.add_error("service_id", "Service is required");
            }
        }

        result
    }
}

fn check_name(result: &mut ValidationResult, name: &str) {
    if name.trim().is_empty() {
        result.add_error("name", "Provider name is required");
    } else if name.len() > 255 {
        result.add_error("name", "Provider name must be less than 255 characters");
    }
}
