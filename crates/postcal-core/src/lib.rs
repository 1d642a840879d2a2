//! Business logic for Postcal.
//!
//! Defines the repository ports implemented by `postcal-infra`, the
//! scheduling engine, the content-generator adapter, and the retention
//! policy. This crate never depends on a specific storage technology or
//! HTTP client.

pub mod generate;
pub mod repository;
pub mod retention;
pub mod service;
