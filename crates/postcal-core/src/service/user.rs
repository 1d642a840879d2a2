//! Default-user bootstrap.
//!
//! Single-user deployments create their one account (plus default
//! preferences) on first start; later starts find it again.

use chrono::Utc;

use postcal_types::error::RepositoryError;
use postcal_types::preferences::Preferences;
use postcal_types::user::{DEFAULT_USER_EMAIL, User, UserId};

use crate::repository::preferences::PreferencesRepository;
use crate::repository::user::UserRepository;

/// Service owning the default-user lifecycle.
pub struct UserService<U: UserRepository, R: PreferencesRepository> {
    users: U,
    preferences: R,
}

impl<U: UserRepository, R: PreferencesRepository> UserService<U, R> {
    pub fn new(users: U, preferences: R) -> Self {
        Self { users, preferences }
    }

    /// Find the deployment's user, creating it with default preferences
    /// when absent. Run once at startup.
    pub async fn bootstrap_default(&self) -> Result<User, RepositoryError> {
        if let Some(user) = self.users.first().await? {
            return Ok(user);
        }

        let user = User {
            id: UserId::new(),
            email: DEFAULT_USER_EMAIL.to_string(),
            created_at: Utc::now(),
        };
        let user = self.users.create(&user).await?;
        self.preferences
            .upsert(&user.id, &Preferences::default())
            .await?;

        tracing::info!(user_id = %user.id, "created default user");
        Ok(user)
    }
}
