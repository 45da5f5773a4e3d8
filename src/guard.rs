//! Authorization guard.
//!
//! A pure decision function over a principal and a requested mutation.
//! The guard performs no I/O and no mutation; it may be called any number
//! of times with the same inputs and always yields the same decision.
//!
//! Policy:
//!
//! | Mutation             | Precondition                                    |
//! |----------------------|-------------------------------------------------|
//! | `CreateListing`      | authenticated                                   |
//! | `EditListing`        | authenticated and identity owns the listing     |
//! | `DeleteListing`      | authenticated and identity owns the listing     |
//! | `CreateReview`       | authenticated and identity does NOT own it      |
//! | `DeleteReview`       | authenticated and identity owns the listing     |
//!
//! Review deletion is owner-moderated: the listing's owner removes reviews
//! on their own listing.

use crate::error::CoreError;
use crate::state::{Listing, Principal};

/// A mutation a caller is requesting against the aggregate.
///
/// Target listings are borrowed: the guard reads ownership fields but
/// never takes ownership of, or changes, the entity.
#[derive(Debug, Clone, Copy)]
pub enum Mutation<'a> {
    /// Publish a new listing.
    CreateListing,
    /// Edit the fields of an existing listing.
    EditListing(&'a Listing),
    /// Delete a listing (and, transitively, its reviews).
    DeleteListing(&'a Listing),
    /// Attach a review to a listing.
    CreateReview(&'a Listing),
    /// Remove a review from a listing.
    DeleteReview(&'a Listing),
}

/// Why a mutation was denied.
///
/// Distinct values so the routing layer can render distinct messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Caller is not authenticated.
    NotAuthenticated,
    /// Caller does not own the target listing.
    NotOwner,
    /// Caller tried to review their own listing.
    SelfReview,
}

impl From<DenyReason> for CoreError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotAuthenticated => Self::NotAuthenticated,
            DenyReason::NotOwner => Self::NotOwner,
            DenyReason::SelfReview => Self::SelfReview,
        }
    }
}

/// The guard's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The mutation is permitted.
    Allow,
    /// The mutation is rejected for the given reason.
    Deny(DenyReason),
}

impl Decision {
    /// Convert the decision into a `Result`, short-circuiting callers
    /// before any store access.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`CoreError`] on [`Decision::Deny`].
    pub fn require(self) -> crate::error::Result<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(reason.into()),
        }
    }
}

/// Decide whether `principal` may perform `mutation`.
#[must_use]
pub fn authorize(principal: &Principal, mutation: &Mutation<'_>) -> Decision {
    let Some(identity) = principal.identity() else {
        return Decision::Deny(DenyReason::NotAuthenticated);
    };

    match mutation {
        Mutation::CreateListing => Decision::Allow,
        Mutation::EditListing(listing)
        | Mutation::DeleteListing(listing)
        | Mutation::DeleteReview(listing) => {
            if identity.owns(listing.owner) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner)
            }
        }
        Mutation::CreateReview(listing) => {
            if identity.owns(listing.owner) {
                Decision::Deny(DenyReason::SelfReview)
            } else {
                Decision::Allow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Identity, ListingId, UserId};

    fn listing_owned_by(owner: UserId) -> Listing {
        Listing {
            id: ListingId::new(),
            title: "Lakeview".into(),
            location: "Geneva".into(),
            image: "lake.jpg".into(),
            price: 200,
            text: "By the water".into(),
            reviews: vec![],
            owner,
        }
    }

    fn principal(user_id: UserId) -> Principal {
        Principal::Authenticated(Identity {
            user_id,
            username: "someone".into(),
        })
    }

    #[test]
    fn anonymous_is_denied_everything() {
        let listing = listing_owned_by(UserId::new());
        for mutation in [
            Mutation::CreateListing,
            Mutation::EditListing(&listing),
            Mutation::DeleteListing(&listing),
            Mutation::CreateReview(&listing),
            Mutation::DeleteReview(&listing),
        ] {
            assert_eq!(
                authorize(&Principal::Anonymous, &mutation),
                Decision::Deny(DenyReason::NotAuthenticated)
            );
        }
    }

    #[test]
    fn any_authenticated_user_may_create_listings() {
        assert_eq!(
            authorize(&principal(UserId::new()), &Mutation::CreateListing),
            Decision::Allow
        );
    }

    #[test]
    fn only_the_owner_may_edit_or_delete() {
        let owner = UserId::new();
        let listing = listing_owned_by(owner);

        assert_eq!(
            authorize(&principal(owner), &Mutation::EditListing(&listing)),
            Decision::Allow
        );
        assert_eq!(
            authorize(&principal(owner), &Mutation::DeleteListing(&listing)),
            Decision::Allow
        );

        let stranger = principal(UserId::new());
        assert_eq!(
            authorize(&stranger, &Mutation::EditListing(&listing)),
            Decision::Deny(DenyReason::NotOwner)
        );
        assert_eq!(
            authorize(&stranger, &Mutation::DeleteListing(&listing)),
            Decision::Deny(DenyReason::NotOwner)
        );
    }

    #[test]
    fn owners_may_not_review_their_own_listing() {
        let owner = UserId::new();
        let listing = listing_owned_by(owner);

        assert_eq!(
            authorize(&principal(owner), &Mutation::CreateReview(&listing)),
            Decision::Deny(DenyReason::SelfReview)
        );
        assert_eq!(
            authorize(&principal(UserId::new()), &Mutation::CreateReview(&listing)),
            Decision::Allow
        );
    }

    #[test]
    fn review_deletion_is_owner_moderated() {
        let owner = UserId::new();
        let listing = listing_owned_by(owner);

        assert_eq!(
            authorize(&principal(owner), &Mutation::DeleteReview(&listing)),
            Decision::Allow
        );
        // Even the review's author cannot delete it on someone else's
        // listing; moderation belongs to the listing owner.
        assert_eq!(
            authorize(&principal(UserId::new()), &Mutation::DeleteReview(&listing)),
            Decision::Deny(DenyReason::NotOwner)
        );
    }

    #[test]
    fn guard_is_idempotent() {
        let listing = listing_owned_by(UserId::new());
        let caller = principal(UserId::new());
        let first = authorize(&caller, &Mutation::CreateReview(&listing));
        let second = authorize(&caller, &Mutation::CreateReview(&listing));
        assert_eq!(first, second);
    }
}
