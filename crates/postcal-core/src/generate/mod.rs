//! Content-generator adapter.
//!
//! Turns a free-text topic into a small ordered list of candidate posts:
//! persona selection by keyword matching, a single non-streaming call to
//! the text-generation backend, line-oriented response parsing, and a
//! deterministic template fallback so callers always receive candidates.

pub mod box_provider;
pub mod fallback;
pub mod parser;
pub mod persona;
pub mod provider;
pub mod service;

pub use box_provider::BoxTextProvider;
pub use provider::TextProvider;
pub use service::GeneratorService;

/// Hard cap on candidates returned per generation, whatever the caller asked for.
pub const MAX_CANDIDATES: usize = 5;
