//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the HTTP API and
//! CLI commands. Services are generic over repository traits, but AppState
//! pins them to the backend-selection store enums from postcal-infra.

use std::path::Path;
use std::sync::Arc;

use postcal_core::generate::{BoxTextProvider, GeneratorService};
use postcal_core::retention::RetentionPolicy;
use postcal_core::service::post::PostService;
use postcal_core::service::preferences::PreferencesService;
use postcal_core::service::schedule::ScheduleService;
use postcal_core::service::user::UserService;
use postcal_infra::config::{AppConfig, StorageBackend, api_key_from_env};
use postcal_infra::llm::AnthropicProvider;
use postcal_infra::sqlite::pool::DatabasePool;
use postcal_infra::store::{PostStore, PreferencesStore, ScheduleStore, StoreHealth, Stores, UserStore};
use postcal_types::user::UserId;

/// Concrete type aliases for the service generics pinned to the store enums.
pub type ConcretePostService = PostService<PostStore>;
pub type ConcreteScheduleService = ScheduleService<ScheduleStore, PostStore, UserStore>;
pub type ConcretePreferencesService = PreferencesService<PreferencesStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GeneratorService>,
    pub post_service: Arc<ConcretePostService>,
    pub schedule_service: Arc<ConcreteScheduleService>,
    pub preferences_service: Arc<ConcretePreferencesService>,
    /// The deployment's implicit user, bootstrapped at init.
    pub default_user: UserId,
    pub health: StoreHealth,
    /// Store handles and policy for the retention purge.
    pub posts: PostStore,
    pub schedules: ScheduleStore,
    pub retention: RetentionPolicy,
}

impl AppState {
    /// Initialize the application state: open the configured backend,
    /// bootstrap the default user, wire services.
    pub async fn init(config: &AppConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let stores = match config.storage.backend {
            StorageBackend::Sqlite => {
                tokio::fs::create_dir_all(data_dir).await?;
                let db_url = format!(
                    "sqlite://{}?mode=rwc",
                    data_dir.join("postcal.db").display()
                );
                Stores::sqlite(DatabasePool::new(&db_url).await?)
            }
            StorageBackend::Memory => {
                tracing::info!("using transient in-memory storage backend");
                Stores::memory()
            }
        };

        // Bootstrap the single implicit user (with default preferences).
        let user_service = UserService::new(stores.users.clone(), stores.preferences.clone());
        let default_user = user_service.bootstrap_default().await?.id;

        let provider = match api_key_from_env() {
            Some(key) => Some(BoxTextProvider::new(AnthropicProvider::new(
                key,
                config.generation.model.clone(),
            ))),
            None => {
                tracing::warn!(
                    "no {} set; generation will use template fallback",
                    postcal_infra::config::API_KEY_ENV
                );
                None
            }
        };

        let schedule_service = ScheduleService::new(
            stores.schedules.clone(),
            stores.posts.clone(),
            stores.users.clone(),
        );

        Ok(Self {
            generator: Arc::new(GeneratorService::new(provider)),
            post_service: Arc::new(PostService::new(stores.posts.clone())),
            schedule_service: Arc::new(schedule_service),
            preferences_service: Arc::new(PreferencesService::new(stores.preferences.clone())),
            default_user,
            health: stores.health.clone(),
            posts: stores.posts,
            schedules: stores.schedules,
            retention: RetentionPolicy::new(config.retention.max_age_days),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_state;

    #[tokio::test]
    async fn test_init_bootstraps_default_user() {
        let state = memory_state().await;
        let prefs = state
            .preferences_service
            .get(&state.default_user)
            .await
            .unwrap();
        assert_eq!(prefs.post_count, 5);
    }
}
