//! Aggregate store trait for the Listing ↔ Review pair.
//!
//! A keyed get/put/delete store plus one conditional-update primitive.
//! No multi-record transaction is assumed: the lifecycle manager builds
//! its integrity guarantees out of [`AggregateStore::update_listing`]
//! (which serializes mutations of one listing record and is keyed on the
//! record's existence) together with compensation and repair-on-read.

use crate::error::Result;
use crate::state::{Listing, ListingId, Review, ReviewId};
use std::future::Future;

/// Durable store for listings and reviews.
pub trait AggregateStore: Send + Sync {
    /// Insert a listing.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn insert_listing(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send;

    /// Get a listing by id. `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn listing(&self, id: ListingId) -> impl Future<Output = Result<Option<Listing>>> + Send;

    /// All listings, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn listings(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send;

    /// Conditionally update one listing record.
    ///
    /// Applies `apply` to the stored record only if it still exists, as a
    /// single serialized step: two concurrent `update_listing` calls on
    /// the same id observe each other's effects, and an update racing a
    /// removal either lands before it (its effect is removed with the
    /// record) or observes the record gone and returns `None`.
    ///
    /// # Returns
    ///
    /// The updated listing, or `None` if the record no longer exists.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn update_listing<F>(
        &self,
        id: ListingId,
        apply: F,
    ) -> impl Future<Output = Result<Option<Listing>>> + Send
    where
        F: FnOnce(&mut Listing) + Send;

    /// Remove a listing, returning the final record.
    ///
    /// Removal is atomic with respect to [`AggregateStore::update_listing`]:
    /// the returned record carries the final review set, with no appends
    /// lost in between.
    ///
    /// # Returns
    ///
    /// The removed listing, or `None` if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn remove_listing(&self, id: ListingId)
    -> impl Future<Output = Result<Option<Listing>>> + Send;

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn insert_review(&self, review: &Review) -> impl Future<Output = Result<()>> + Send;

    /// Get a review by id. `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn review(&self, id: ReviewId) -> impl Future<Output = Result<Option<Review>>> + Send;

    /// Remove a review.
    ///
    /// # Returns
    ///
    /// `true` if a record was removed, `false` if none existed (removal
    /// is idempotent).
    ///
    /// # Errors
    ///
    /// Returns error if the store is unavailable.
    fn remove_review(&self, id: ReviewId) -> impl Future<Output = Result<bool>> + Send;
}
