//! Mock session store for testing.

use crate::error::{CoreError, Result};
use crate::providers::SessionStore;
use crate::state::{Session, SessionId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Uses in-memory storage for testing. Expiry is left to the session
/// manager; this store keeps records until they are removed.
#[derive(Debug, Clone)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl MockSessionStore {
    /// Create a new mock session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count of stored sessions (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
            .len())
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MockSessionStore {
    fn create_session(&self, session: &Session) -> impl Future<Output = Result<()>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session = session.clone();

        async move {
            let mut guard = sessions
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?;

            if guard.contains_key(&session.session_id) {
                return Err(CoreError::StoreError(
                    "Session ID already exists".to_string(),
                ));
            }

            guard.insert(session.session_id, session);
            Ok(())
        }
    }

    fn session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            Ok(sessions
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .get(&session_id)
                .cloned())
        }
    }

    fn remove_session(&self, session_id: SessionId) -> impl Future<Output = Result<bool>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            Ok(sessions
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .remove(&session_id)
                .is_some())
        }
    }
}
