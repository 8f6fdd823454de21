//! # Providers Module
//!
//! A Provider is a specific vendor under a Service, rated by Reviews.
//! The list view supports the filters and free-text search the
//! back-office exposes (by service, by date ranges, by name).

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::providers_routes;
