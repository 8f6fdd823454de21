//! Tests for providers module
//!
//! These tests verify core provider functionality including:
//! - Provider model structure
//! - Provider validation

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use validators::ProviderValidator;

    #[test]
    fn test_provider_model_structure() {
        let provider = models::Provider {
            id: "P_K7NP3X".to_string(),
            name: "Acme Pipes".to_string(),
            service_id: "S_8MWQT2".to_string(),
            created_by: "U_XY12AB".to_string(),
            created_at: Some("2024-01-01 00:00:00".to_string()),
            updated_at: Some("2024-01-02 00:00:00".to_string()),
        };

        assert_eq!(provider.name, "Acme Pipes");
        assert_eq!(provider.service_id, "S_8MWQT2");
    }

    #[test]
    fn test_provider_list_item_carries_service_name() {
        let item = models::ProviderListItem {
            id: "P_K7NP3X".to_string(),
            name: "Acme Pipes".to_string(),
            service_id: "S_8MWQT2".to_string(),
            service_name: "Plumbing".to_string(),
            created_at: None,
            updated_at: None,
        };

        assert_eq!(item.service_name, "Plumbing");
    }

    #[test]
    fn test_create_provider_validation_success() {
        let request = models::CreateProviderRequest {
            name: "Acme Pipes".to_string(),
            service_id: "S_8MWQT2".to_string(),
        };

        let result = ProviderValidator.validate(&request);
        assert!(result.is_valid, "Valid provider should pass validation");
    }

    #[test]
    fn test_create_provider_validation_empty_name() {
        let request = models::CreateProviderRequest {
            name: "".to_string(),
            service_id: "S_8MWQT2".to_string(),
        };

        let result = ProviderValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_create_provider_validation_missing_service() {
        let request = models::CreateProviderRequest {
            name: "Acme Pipes".to_string(),
            service_id: "  ".to_string(),
        };

        let result = ProviderValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "service_id"));
    }

    #[test]
    fn test_create_provider_validation_name_too_long() {
        let request = models::CreateProviderRequest {
            name: "a".repeat(256),
            service_id: "S_8MWQT2".to_string(),
        };

        let result = ProviderValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_update_provider_validation_allows_partial_update() {
        let request = models::UpdateProviderRequest {
            name: None,
            service_id: Some("S_NEWSVC".to_string()),
        };

        let result = ProviderValidator.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_update_provider_validation_rejects_blank_fields() {
        let request = models::UpdateProviderRequest {
            name: Some(" ".to_string()),
            service_id: Some("".to_string()),
        };

        let result = ProviderValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
        assert!(result.errors.iter().any(|e| e.field == "service_id"));
    }
}
