//! # Services Module
//!
//! A Service is a category grouping of Providers (e.g. "Plumbing").
//! Any authenticated user can create services; only superusers can
//! change or delete them.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::services_routes;
