// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., S_K7NP3X for services)
//!
//! Benefits:
//! - No ambiguous characters (excludes I, L, O, U)
//! - Case-insensitive
//! - ~1 billion combinations per entity type (32^6)
//! - Easy to read, type, and communicate verbally

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
    /// Auth group (G_)
    Group,
    /// Service category (S_)
    Service,
    /// Provider under a service (P_)
    Provider,
    /// Review of a provider (R_)
    Review,
}

impl EntityPrefix {
    /// Get the string prefix for this entity type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Group => "G",
            EntityPrefix::Service => "S",
            EntityPrefix::Provider => "P",
            EntityPrefix::Review => "R",
        }
    }
}

/// Generate a random Crockford Base32 string of specified length
fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID using Crockford Base32 encoding
///
/// Returns a string in format "PREFIX_XXXXXX" (e.g., "S_K7NP3X")
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

// ============================================================================
// Convenience functions for each entity type
// ============================================================================

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a Group ID (G_XXXXXX)
pub fn generate_group_id() -> String {
    generate_id(EntityPrefix::Group)
}

/// Generate a Service ID (S_XXXXXX)
pub fn generate_service_id() -> String {
    generate_id(EntityPrefix::Service)
}

/// Generate a Provider ID (P_XXXXXX)
pub fn generate_provider_id() -> String {
    generate_id(EntityPrefix::Provider)
}

/// Generate a Review ID (R_XXXXXX)
pub fn generate_review_id() -> String {
    generate_id(EntityPrefix::Review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let service_id = generate_service_id();
        assert!(service_id.starts_with("S_"));
        assert_eq!(service_id.len(), 8); // "S_" + 6 chars

        let review_id = generate_review_id();
        assert!(review_id.starts_with("R_"));
        assert_eq!(review_id.len(), 8);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_provider_id();
        let random_part = &id[2..]; // Skip "P_"

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }

        // Verify no ambiguous characters
        assert!(!random_part.contains('I'));
        assert!(!random_part.contains('L'));
        assert!(!random_part.contains('O'));
        assert!(!random_part.contains('U'));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let id = generate_review_id();
            assert!(ids.insert(id), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_all_prefixes() {
        assert!(generate_user_id().starts_with("U_"));
        assert!(generate_group_id().starts_with("G_"));
        assert!(generate_service_id().starts_with("S_"));
        assert!(generate_provider_id().starts_with("P_"));
        assert!(generate_review_id().starts_with("R_"));
    }
}
