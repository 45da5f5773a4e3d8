//! Lifecycle manager for the Listing ↔ Review aggregate.
//!
//! Executes permitted mutations while preserving the central invariant:
//! every review id in a listing's review set resolves to a stored review
//! whose parent is that listing, and no review outlives its parent.
//!
//! The store offers no multi-record transactions, so the two-record
//! operations compensate instead:
//!
//! - **Attach** (`create_review`): insert the review, then conditionally
//!   append its id to the parent keyed on the parent's existence. If the
//!   parent vanished, the insert is rolled back — both writes succeed or
//!   both fail from the caller's perspective.
//! - **Cascade** (`delete_listing`): atomically remove the parent,
//!   capturing its final review set (the serialization point against
//!   concurrent appends), then purge the captured reviews. A review in
//!   the window between the two steps is tombstoned: any read that finds
//!   a review without its parent treats it as deleted and purges it.
//! - **Repair-on-read**: a review id in a listing's set that resolves to
//!   nothing is pruned, logged, and never surfaced as live data.
//!
//! Every operation checks authorization before its first store write.

use crate::error::{CoreError, Entity, Result};
use crate::guard::{Mutation, authorize};
use crate::providers::AggregateStore;
use crate::state::{Listing, ListingDraft, ListingId, Principal, Review, ReviewId};
use crate::validate::{validate_listing, validate_review_text};

/// Lifecycle manager over a durable aggregate store.
#[derive(Debug, Clone)]
pub struct Lifecycle<A> {
    store: A,
}

impl<A: AggregateStore> Lifecycle<A> {
    /// Create a lifecycle manager over the given store.
    pub const fn new(store: A) -> Self {
        Self { store }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Listings
    // ═══════════════════════════════════════════════════════════════════

    /// Publish a new listing owned by the requester.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` for anonymous callers (nothing is written)
    /// - `ValidationFailed` with every failing field
    /// - `StoreError` on store failure
    pub async fn create_listing(
        &self,
        requester: &Principal,
        draft: ListingDraft,
    ) -> Result<Listing> {
        authorize(requester, &Mutation::CreateListing).require()?;
        let identity = requester.identity().ok_or(CoreError::NotAuthenticated)?;
        validate_listing(&draft).map_err(CoreError::ValidationFailed)?;

        let listing = Listing {
            id: ListingId::new(),
            title: draft.title,
            location: draft.location,
            image: draft.image,
            price: draft.price,
            text: draft.text,
            reviews: Vec::new(),
            owner: identity.user_id,
        };
        self.store.insert_listing(&listing).await?;
        tracing::debug!(listing_id = %listing.id.0, owner = %identity.username, "listing created");
        Ok(listing)
    }

    /// Get a listing by id, repairing any dangling review references.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the listing does not exist
    /// - `StoreError` on store failure
    pub async fn listing(&self, id: ListingId) -> Result<Listing> {
        let listing = self
            .store
            .listing(id)
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))?;
        self.repair_review_refs(listing).await
    }

    /// All listings. Review sets are returned as stored; per-listing reads
    /// go through [`Lifecycle::listing`] and get repaired there.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on store failure.
    pub async fn listings(&self) -> Result<Vec<Listing>> {
        self.store.listings().await
    }

    /// Edit the mutable fields of a listing.
    ///
    /// Owner and review set are not part of a draft and cannot change.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` / `NotOwner` per the guard
    /// - `ValidationFailed` with every failing field
    /// - `NotFound` if the listing does not exist
    /// - `StoreError` on store failure
    pub async fn edit_listing(
        &self,
        id: ListingId,
        draft: ListingDraft,
        requester: &Principal,
    ) -> Result<Listing> {
        let listing = self
            .store
            .listing(id)
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))?;
        authorize(requester, &Mutation::EditListing(&listing)).require()?;
        validate_listing(&draft).map_err(CoreError::ValidationFailed)?;

        self.store
            .update_listing(id, move |stored| {
                stored.title = draft.title;
                stored.location = draft.location;
                stored.image = draft.image;
                stored.price = draft.price;
                stored.text = draft.text;
            })
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))
    }

    /// Delete a listing and cascade to every review in its review set.
    ///
    /// The listing record is removed first, atomically capturing its
    /// final review set; a `create_review` racing this call either lands
    /// its reference before the capture (and is purged here) or observes
    /// the listing gone and rolls itself back.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` / `NotOwner` per the guard
    /// - `NotFound` if the listing does not exist (a repeat delete is a
    ///   no-op reporting `NotFound`, not a crash)
    /// - `StoreError` on store failure
    pub async fn delete_listing(&self, id: ListingId, requester: &Principal) -> Result<()> {
        let listing = self
            .store
            .listing(id)
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))?;
        authorize(requester, &Mutation::DeleteListing(&listing)).require()?;

        // Serialization point: captures the final review set.
        let Some(removed) = self.store.remove_listing(id).await? else {
            // Lost a race with another delete.
            return Err(CoreError::NotFound(Entity::Listing));
        };

        let mut purged = 0usize;
        for review_id in &removed.reviews {
            if self.store.remove_review(*review_id).await? {
                purged += 1;
            }
        }
        tracing::info!(listing_id = %id.0, reviews_purged = purged, "listing cascade-deleted");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reviews
    // ═══════════════════════════════════════════════════════════════════

    /// Attach a review to a listing.
    ///
    /// Two-record operation with compensation: the review record is
    /// inserted, then its id is appended to the parent via conditional
    /// update keyed on the parent's existence. If the parent vanished in
    /// between, the review record is removed again and `NotFound` is
    /// returned — the caller observes both writes or neither.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the listing does not exist
    /// - `NotAuthenticated` / `SelfReview` per the guard
    /// - `ValidationFailed` if the text is empty or too long
    /// - `StoreError` on store failure
    pub async fn create_review(
        &self,
        listing_id: ListingId,
        requester: &Principal,
        text: &str,
    ) -> Result<Review> {
        let listing = self
            .store
            .listing(listing_id)
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))?;
        authorize(requester, &Mutation::CreateReview(&listing)).require()?;
        let author = requester.identity().ok_or(CoreError::NotAuthenticated)?;
        validate_review_text(text).map_err(CoreError::ValidationFailed)?;

        let review = Review {
            id: ReviewId::new(),
            listing: listing_id,
            author: author.user_id,
            text: text.to_owned(),
        };
        self.store.insert_review(&review).await?;

        let review_id = review.id;
        let attach = self
            .store
            .update_listing(listing_id, move |stored| stored.reviews.push(review_id))
            .await;

        match attach {
            Ok(Some(_)) => Ok(review),
            Ok(None) => {
                // Parent vanished between insert and attach; roll back.
                self.store.remove_review(review.id).await?;
                tracing::debug!(
                    listing_id = %listing_id.0,
                    review_id = %review.id.0,
                    "review rolled back, parent listing deleted concurrently"
                );
                Err(CoreError::NotFound(Entity::Listing))
            }
            Err(err) => {
                // Best-effort rollback; repair-on-read covers the rest.
                if let Err(rollback) = self.store.remove_review(review.id).await {
                    tracing::warn!(
                        review_id = %review.id.0,
                        error = %rollback,
                        "failed to roll back orphan review after attach failure"
                    );
                }
                Err(err)
            }
        }
    }

    /// Look up a review within a listing, honoring tombstone semantics.
    ///
    /// A review whose parent listing no longer exists is treated as
    /// deleted: it is purged and reported `NotFound`, never surfaced as
    /// live data.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the review does not exist, belongs to a different
    ///   listing, or is orphaned
    /// - `StoreError` on store failure
    pub async fn review(&self, listing_id: ListingId, review_id: ReviewId) -> Result<Review> {
        let Some(review) = self.store.review(review_id).await? else {
            return Err(CoreError::NotFound(Entity::Review));
        };
        if review.listing != listing_id {
            return Err(CoreError::NotFound(Entity::Review));
        }

        if self.store.listing(listing_id).await?.is_none() {
            // Orphan caught mid-cascade: tombstoned.
            self.store.remove_review(review_id).await?;
            tracing::warn!(
                review_id = %review_id.0,
                listing_id = %listing_id.0,
                "purged orphan review with no parent listing"
            );
            return Err(CoreError::NotFound(Entity::Review));
        }

        Ok(review)
    }

    /// Remove a review from a listing (owner moderation).
    ///
    /// Converges even from a half-completed state: the reference removal
    /// and the record removal are each idempotent, so re-running the
    /// operation finishes the job; a second full run reports `NotFound`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the listing is gone, or the review is neither
    ///   referenced nor stored
    /// - `NotAuthenticated` / `NotOwner` per the guard
    /// - `StoreError` on store failure
    pub async fn delete_review(
        &self,
        listing_id: ListingId,
        review_id: ReviewId,
        requester: &Principal,
    ) -> Result<()> {
        let listing = self
            .store
            .listing(listing_id)
            .await?
            .ok_or(CoreError::NotFound(Entity::Listing))?;
        authorize(requester, &Mutation::DeleteReview(&listing)).require()?;

        let had_ref = listing.reviews.contains(&review_id);
        let record = self.store.review(review_id).await?;
        let belongs = record.as_ref().is_some_and(|r| r.listing == listing_id);
        if !had_ref && !belongs {
            return Err(CoreError::NotFound(Entity::Review));
        }

        if had_ref {
            self.store
                .update_listing(listing_id, move |stored| {
                    stored.reviews.retain(|id| *id != review_id);
                })
                .await?;
        }
        if belongs {
            self.store.remove_review(review_id).await?;
        }
        tracing::debug!(listing_id = %listing_id.0, review_id = %review_id.0, "review deleted");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Integrity repair
    // ═══════════════════════════════════════════════════════════════════

    /// Prune review references that resolve to nothing.
    ///
    /// Dangling references can only arise from an interrupted compensation;
    /// they are healed here and logged, never exposed to the caller.
    async fn repair_review_refs(&self, listing: Listing) -> Result<Listing> {
        let mut dangling = Vec::new();
        for review_id in &listing.reviews {
            match self.store.review(*review_id).await? {
                Some(review) if review.listing == listing.id => {}
                _ => dangling.push(*review_id),
            }
        }
        if dangling.is_empty() {
            return Ok(listing);
        }

        tracing::warn!(
            listing_id = %listing.id.0,
            count = dangling.len(),
            "repaired dangling review references"
        );
        let repaired = self
            .store
            .update_listing(listing.id, {
                let dangling = dangling.clone();
                move |stored| stored.reviews.retain(|id| !dangling.contains(id))
            })
            .await?;

        // If the listing vanished mid-repair the caller raced a delete;
        // report the pruned view we already hold.
        Ok(repaired.unwrap_or_else(|| {
            let mut pruned = listing;
            pruned.reviews.retain(|id| !dangling.contains(id));
            pruned
        }))
    }
}
