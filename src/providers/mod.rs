//! External dependency traits.
//!
//! This module defines traits for everything the core consumes from its
//! surroundings: the identity store, the session store, and the durable
//! aggregate store. The session and lifecycle managers depend on these
//! traits only, so the core runs identically against an in-memory mock
//! (see [`crate::mocks`]) or a real database adapter.
//!
//! All trait methods return `impl Future<Output = _> + Send`, keeping the
//! core runtime-agnostic while staying usable from multi-threaded
//! executors.

use crate::providers::credentials::Credential;
use crate::state::UserId;
use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod credentials;
pub mod session;
pub mod user;

// Re-export provider traits
pub use aggregate::AggregateStore;
pub use credentials::CredentialVerifier;
pub use session::SessionStore;
pub use user::UserRepository;

/// User identity record.
///
/// `username` is the immutable, unique identity key; `email` is unique as
/// well. The credential material may be rotated, nothing else changes
/// after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable identity key.
    pub user_id: UserId,

    /// Unique username. Immutable once created.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Opaque credential material.
    pub credential: Credential,
}
