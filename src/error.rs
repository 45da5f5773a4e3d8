//! Error types for authentication, authorization, and lifecycle operations.

use crate::validate::FieldErrors;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Entity kinds referenced by [`CoreError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A user identity record.
    User,
    /// A published listing.
    Listing,
    /// A review attached to a listing.
    Review,
    /// A session record.
    Session,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Listing => "listing",
            Self::Review => "review",
            Self::Session => "session",
        };
        write!(f, "{name}")
    }
}

/// Error taxonomy for the listings-and-reviews core.
///
/// Organized by category: authentication, authorization, validation,
/// lookup, and store failures. Integrity repairs are deliberately absent —
/// they are logged and healed, never surfaced as errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    // ═══════════════════════════════════════════════════════════
    // Authentication
    // ═══════════════════════════════════════════════════════════
    /// Credential verification failed.
    ///
    /// Covers both "no such user" and "wrong secret" so callers cannot
    /// enumerate usernames; the distinction goes only to internal logging.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username or email already registered.
    #[error("Username or email already taken")]
    IdentityTaken,

    // ═══════════════════════════════════════════════════════════
    // Authorization
    // ═══════════════════════════════════════════════════════════
    /// Caller is not authenticated.
    #[error("You must be logged in")]
    NotAuthenticated,

    /// Caller is authenticated but does not own the target listing.
    #[error("Only the owner may do this")]
    NotOwner,

    /// Caller attempted to review their own listing.
    #[error("You cannot review your own listing")]
    SelfReview,

    // ═══════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════
    /// Field constraints violated; all failing fields collected.
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    // ═══════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(Entity),

    // ═══════════════════════════════════════════════════════════
    // Store
    // ═══════════════════════════════════════════════════════════
    /// Underlying persistence failure, not locally recoverable.
    #[error("Store error: {0}")]
    StoreError(String),
}

impl CoreError {
    /// Returns `true` if this error is an expected, user-recoverable
    /// condition (bad input, missing permission) rather than a system
    /// failure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lodgekeep::CoreError;
    /// assert!(CoreError::InvalidCredentials.is_user_error());
    /// assert!(!CoreError::StoreError("io".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::StoreError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_not_user_errors() {
        assert!(!CoreError::StoreError("disk full".into()).is_user_error());
        assert!(CoreError::NotOwner.is_user_error());
        assert!(CoreError::NotFound(Entity::Review).is_user_error());
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            CoreError::NotFound(Entity::Listing).to_string(),
            "listing not found"
        );
    }
}
