//! # Admin Module
//!
//! The back-office surface that is not tied to a single catalog
//! entity: the navigation index with its fixed section ordering, user
//! account management, and auth groups.

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::admin_routes;
