//! Observability setup for Postcal.

pub mod tracing_setup;
