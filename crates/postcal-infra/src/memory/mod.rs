//! In-memory storage layer.
//!
//! DashMap-backed repository implementations sharing one [`MemoryStore`].
//! Process-local and transient: state dies with the process. Used for
//! tests and config-selected ephemeral deployments; the semantics mirror
//! the SQLite backend exactly.

pub mod post;
pub mod preferences;
pub mod schedule;
pub mod store;
pub mod user;

pub use store::MemoryStore;
