//! User repository trait (the identity store).

use super::User;
use crate::error::Result;
use crate::providers::credentials::Credential;
use crate::state::UserId;
use std::future::Future;

/// Identity store.
///
/// Holds user identity records and their credential material. Lookups
/// return `Ok(None)` for absent users; the caller decides whether absence
/// is an error (lifecycle) or a fail-closed anonymous (session resolve).
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store is unavailable
    /// - Username or email already exists → `CoreError::IdentityTaken`
    fn insert_user(&self, user: &User) -> impl Future<Output = Result<()>> + Send;

    /// Get a user by identity key.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn user_by_id(&self, user_id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn user_by_username(&self, username: &str)
    -> impl Future<Output = Result<Option<User>>> + Send;

    /// Replace a user's credential material.
    ///
    /// The identity key and username stay fixed; only the credential
    /// rotates.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store is unavailable
    /// - The user does not exist → `CoreError::NotFound`
    fn rotate_credential(
        &self,
        user_id: UserId,
        credential: &Credential,
    ) -> impl Future<Output = Result<()>> + Send;
}
