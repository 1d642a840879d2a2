//! Request handlers for the REST API.

pub mod generate;
pub mod health;
pub mod post;
pub mod preferences;
pub mod schedule;
