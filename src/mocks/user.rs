//! Mock user repository for testing.

use crate::error::{CoreError, Entity, Result};
use crate::providers::credentials::Credential;
use crate::providers::{User, UserRepository};
use crate::state::UserId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock user repository.
///
/// Uses in-memory storage for testing. Enforces username and email
/// uniqueness like a real identity store.
#[derive(Debug, Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl MockUserRepository {
    /// Create a new mock user repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count of stored users (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn user_count(&self) -> Result<usize> {
        Ok(self
            .users
            .lock()
            .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
            .len())
    }

    /// Remove a user outright (for testing vanished-user scenarios).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn evict_user(&self, user_id: UserId) -> Result<()> {
        self.users
            .lock()
            .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
            .remove(&user_id);
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MockUserRepository {
    fn insert_user(&self, user: &User) -> impl Future<Output = Result<()>> + Send {
        let users = Arc::clone(&self.users);
        let user = user.clone();

        async move {
            let mut guard = users
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?;

            let taken = guard
                .values()
                .any(|u| u.username == user.username || u.email == user.email);
            if taken {
                return Err(CoreError::IdentityTaken);
            }

            guard.insert(user.user_id, user);
            Ok(())
        }
    }

    fn user_by_id(&self, user_id: UserId) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);

        async move {
            Ok(users
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .get(&user_id)
                .cloned())
        }
    }

    fn user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send {
        let users = Arc::clone(&self.users);
        let username = username.to_owned();

        async move {
            Ok(users
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .values()
                .find(|u| u.username == username)
                .cloned())
        }
    }

    fn rotate_credential(
        &self,
        user_id: UserId,
        credential: &Credential,
    ) -> impl Future<Output = Result<()>> + Send {
        let users = Arc::clone(&self.users);
        let credential = credential.clone();

        async move {
            let mut guard = users
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?;

            let user = guard
                .get_mut(&user_id)
                .ok_or(CoreError::NotFound(Entity::User))?;
            user.credential = credential;
            Ok(())
        }
    }
}
