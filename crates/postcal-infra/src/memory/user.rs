//! In-memory user repository implementation.

use postcal_core::repository::user::UserRepository;
use postcal_types::error::RepositoryError;
use postcal_types::user::{User, UserId};

use super::store::MemoryStore;

/// Map-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let users = self.store.users();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.0, user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.users().get(&id.0).map(|u| u.clone()))
    }

    async fn first(&self) -> Result<Option<User>, RepositoryError> {
        let mut users: Vec<User> = self.store.users().iter().map(|u| u.clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_user(email: &str) -> User {
        User {
            id: UserId::new(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MemoryUserRepository::new(MemoryStore::new());
        let user = make_user("someone@example.com");

        repo.create(&user).await.unwrap();
        let found = repo.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "someone@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryUserRepository::new(MemoryStore::new());
        repo.create(&make_user("dup@example.com")).await.unwrap();

        let err = repo.create(&make_user("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_first_on_empty_store() {
        let repo = MemoryUserRepository::new(MemoryStore::new());
        assert!(repo.first().await.unwrap().is_none());
    }
}
