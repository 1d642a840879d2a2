//! Service layer orchestrating the repository ports.

pub mod post;
pub mod preferences;
pub mod schedule;
pub mod user;
