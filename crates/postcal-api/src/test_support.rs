//! Shared fixtures for handler and service tests.

use std::path::Path;
use std::sync::Arc;

use postcal_core::generate::GeneratorService;
use postcal_infra::config::{AppConfig, StorageBackend, StorageConfig};

use crate::state::AppState;

/// Memory-backed state: no filesystem, no network, bootstrap included.
///
/// The generator is forced provider-less so tests stay deterministic even
/// when the environment carries a real API key.
pub(crate) async fn memory_state() -> AppState {
    let config = AppConfig {
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
        ..AppConfig::default()
    };
    let mut state = AppState::init(&config, Path::new("/nonexistent"))
        .await
        .unwrap();
    state.generator = Arc::new(GeneratorService::new(None));
    state
}
