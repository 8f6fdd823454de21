// Common module - shared types and utilities across all modules

pub mod error;
pub mod id_generator;
pub mod migrations;
pub mod policy;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::ApiError;
pub use id_generator::*;
pub use policy::{is_allowed, Action, Actor, Entity};
pub use state::{AppState, SiteConfig};
pub use validation::{ValidationError, ValidationResult, Validator};
