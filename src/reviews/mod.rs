//! # Reviews Module
//!
//! A Review is a user's rating and comment on a Provider. Ratings run
//! 0 through 4. Reviews belong to their author: nobody else, superuser
//! or not, may change or delete them.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::reviews_routes;
