// src/services/validators.rs

use super::models::*;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Service Validators
// ============================================================================

pub struct ServiceValidator;

impl Validator<CreateServiceRequest> for ServiceValidator {
    fn validate(&self, data: &CreateServiceRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        check_name(&mut result, &data.name);
        result
    }
}

impl Validator<UpdateServiceRequest> for ServiceValidator {
    fn validate(&self, data: &UpdateServiceRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        if let Some(name) = &data.name {
            check_name(&mut result, name);
        }
        result
    }
}

fn check_name(result: &mut ValidationResult, name: &str) {
    if name.trim().is_empty() {
        result.add_error("name", "Service name is required");
    } else if name.len() > 255 {
        result.add_error("name", "Service name must be less than 255 characters");
    }
}
