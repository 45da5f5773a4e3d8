//! Session store trait.

use crate::error::Result;
use crate::state::{Session, SessionId};
use std::future::Future;

/// Session store.
///
/// Holds ephemeral session records keyed by [`SessionId`]. Records are not
/// expected to survive past their `expires_at`; a store may drop them
/// eagerly (TTL) or leave expiry to the session manager, which checks the
/// timestamp on every resolve.
pub trait SessionStore: Send + Sync {
    /// Create a session record.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store is unavailable
    /// - The session id already exists
    fn create_session(&self, session: &Session) -> impl Future<Output = Result<()>> + Send;

    /// Get a session by id.
    ///
    /// Returns `Ok(None)` for unknown references.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn session(&self, session_id: SessionId)
    -> impl Future<Output = Result<Option<Session>>> + Send;

    /// Delete a session.
    ///
    /// # Returns
    ///
    /// `true` if a record was removed, `false` if none existed (deletion
    /// is idempotent).
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn remove_session(&self, session_id: SessionId) -> impl Future<Output = Result<bool>> + Send;
}
