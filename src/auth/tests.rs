//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token validation
//! - Password hashing and verification
//! - User model structure

#[cfg(test)]
mod tests {
    use super::super::*;
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    #[test]
    fn test_claims_structure() {
        let claims = models::Claims {
            sub: "U_K7NP3X".to_string(),
            exp: 1234567890,
        };

        assert_eq!(claims.sub, "U_K7NP3X");
        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_jwt_encoding_and_decoding() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_K7NP3X".to_string(),
            exp: 9999999999, // Far future
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "U_K7NP3X");
        assert_eq!(decoded.claims.exp, 9999999999);
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let secret = "test_secret_key";
        let wrong_secret = "wrong_secret_key";

        let claims = models::Claims {
            sub: "U_K7NP3X".to_string(),
            exp: 9999999999,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(wrong_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(
            result.is_err(),
            "Token validation should fail with wrong secret"
        );
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = passwords::hash_password("correct horse battery staple")
            .expect("Failed to hash password");

        assert!(passwords::verify_password(
            "correct horse battery staple",
            &hash
        ));
        assert!(!passwords::verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        assert!(!passwords::verify_password("anything", "not-a-phc-string"));
        assert!(!passwords::verify_password("anything", ""));
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let first = passwords::hash_password("same password").expect("hash failed");
        let second = passwords::hash_password("same password").expect("hash failed");

        // Fresh salt per hash, so two hashes of the same input differ
        assert_ne!(first, second);
    }

    #[test]
    fn test_user_model_structure() {
        let user = models::User {
            id: "U_K7NP3X".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$...".to_string(),
            email: Some("alice@example.com".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
            is_superuser: 1,
            is_staff: 1,
            is_active: 1,
            date_joined: Some("2024-01-01 00:00:00".to_string()),
            last_login: None,
        };

        assert_eq!(user.username, "alice");
        assert_eq!(user.is_superuser, 1);
        assert_eq!(user.last_login, None);
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = models::User {
            id: "U_K7NP3X".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            email: None,
            first_name: None,
            last_name: None,
            is_superuser: 0,
            is_staff: 0,
            is_active: 1,
            date_joined: None,
            last_login: None,
        };

        let json = serde_json::to_string(&user).expect("Failed to serialize user");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$argon2id$secret"));
    }
}
