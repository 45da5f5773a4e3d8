//! Core state types.
//!
//! Identity, session, and aggregate (Listing/Review) types. All types are
//! `Clone` and `serde`-serializable for the durable-store boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub uuid::Uuid);

impl ListingId {
    /// Generate a new random `ListingId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub uuid::Uuid);

impl ReviewId {
    /// Generate a new random `ReviewId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a session.
///
/// Doubles as the opaque session reference handed to the transport layer.
/// It carries no credential material; resolving it requires the session
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Generate a new random `SessionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════

/// An authenticated principal.
///
/// The typed replacement for comparing raw username strings: ownership
/// checks compare [`Identity::user_id`] against an entity's owner field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identity key.
    pub user_id: UserId,

    /// Username (cached for display; the key is `user_id`).
    pub username: String,
}

impl Identity {
    /// Whether this identity owns the given owner field.
    #[must_use]
    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}

/// The principal attached to a request: either anonymous or an
/// authenticated [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// No authenticated identity.
    Anonymous,
    /// An authenticated identity.
    Authenticated(Identity),
}

impl Principal {
    /// The identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    /// Whether this principal is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════

/// An ephemeral binding between a session reference and a user identity.
///
/// Sessions expire at a fixed `expires_at`; resolution fails closed to
/// anonymous once that point passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (the opaque reference).
    pub session_id: SessionId,

    /// User this session is bound to.
    pub user_id: UserId,

    /// Username cached at login time.
    pub username: String,

    /// Session creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Fixed expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiration point.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// The identity this session carries.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Aggregate: Listing ↔ Review
// ═══════════════════════════════════════════════════════════════════════

/// A published listing (source term "hotel").
///
/// `owner` is immutable after creation; `reviews` is mutated only by the
/// lifecycle manager. Invariant: every id in `reviews` resolves to a
/// stored [`Review`] whose `listing` is this listing's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,

    /// Listing title (1–40 chars).
    pub title: String,

    /// Location (non-empty).
    pub location: String,

    /// Image reference.
    pub image: String,

    /// Nightly price (1–9999).
    pub price: u32,

    /// Descriptive text (1–1000 chars).
    pub text: String,

    /// Ordered set of attached review ids.
    pub reviews: Vec<ReviewId>,

    /// Identity key of the creating user. Immutable.
    pub owner: UserId,
}

/// The mutable fields of a listing, as submitted on create/edit.
///
/// Owner and review set are never part of a draft, so edits cannot touch
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    /// Listing title.
    pub title: String,
    /// Location.
    pub location: String,
    /// Image reference.
    pub image: String,
    /// Nightly price.
    pub price: u32,
    /// Descriptive text.
    pub text: String,
}

impl ListingDraft {
    /// Convenience constructor.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        image: impl Into<String>,
        price: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            image: image.into(),
            price,
            text: text.into(),
        }
    }
}

/// A review attached to exactly one listing.
///
/// Invariant: `author` differs from the parent listing's `owner`, and
/// `listing` resolves to a stored [`Listing`] (outside the cascade-delete
/// window, during which the review is tombstoned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,

    /// Parent listing.
    pub listing: ListingId,

    /// Identity key of the reviewer.
    pub author: UserId,

    /// Review text (1–350 chars).
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(ListingId::new(), ListingId::new());
        assert_ne!(ReviewId::new(), ReviewId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn ownership_compares_identity_keys() {
        let owner = UserId::new();
        let identity = Identity {
            user_id: owner,
            username: "alice".into(),
        };
        assert!(identity.owns(owner));
        assert!(!identity.owns(UserId::new()));
    }

    #[test]
    fn session_expiry_is_inclusive() {
        let now = Utc::now();
        let session = Session {
            session_id: SessionId::new(),
            user_id: UserId::new(),
            username: "alice".into(),
            created_at: now,
            expires_at: now,
        };
        assert!(session.is_expired(now));
    }
}
