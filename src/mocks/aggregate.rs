//! Mock aggregate store for testing.

use crate::error::{CoreError, Result};
use crate::providers::AggregateStore;
use crate::state::{Listing, ListingId, Review, ReviewId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock aggregate store.
///
/// Uses in-memory storage for testing. All listing mutations go through
/// one lock, so `update_listing` and `remove_listing` serialize exactly
/// as the trait contract requires.
#[derive(Debug, Clone)]
pub struct MockAggregateStore {
    listings: Arc<Mutex<Vec<Listing>>>,
    reviews: Arc<Mutex<HashMap<ReviewId, Review>>>,
}

impl MockAggregateStore {
    /// Create a new mock aggregate store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: Arc::new(Mutex::new(Vec::new())),
            reviews: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count of stored listings (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn listing_count(&self) -> Result<usize> {
        Ok(self
            .listings
            .lock()
            .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
            .len())
    }

    /// Count of stored review records (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn review_count(&self) -> Result<usize> {
        Ok(self
            .reviews
            .lock()
            .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
            .len())
    }
}

impl Default for MockAggregateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateStore for MockAggregateStore {
    fn insert_listing(&self, listing: &Listing) -> impl Future<Output = Result<()>> + Send {
        let listings = Arc::clone(&self.listings);
        let listing = listing.clone();

        async move {
            listings
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .push(listing);
            Ok(())
        }
    }

    fn listing(&self, id: ListingId) -> impl Future<Output = Result<Option<Listing>>> + Send {
        let listings = Arc::clone(&self.listings);

        async move {
            Ok(listings
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .iter()
                .find(|l| l.id == id)
                .cloned())
        }
    }

    fn listings(&self) -> impl Future<Output = Result<Vec<Listing>>> + Send {
        let listings = Arc::clone(&self.listings);

        async move {
            Ok(listings
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .clone())
        }
    }

    fn update_listing<F>(
        &self,
        id: ListingId,
        apply: F,
    ) -> impl Future<Output = Result<Option<Listing>>> + Send
    where
        F: FnOnce(&mut Listing) + Send,
    {
        let listings = Arc::clone(&self.listings);

        async move {
            let mut guard = listings
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?;

            // Keyed on existence: a removed record is never resurrected.
            match guard.iter_mut().find(|l| l.id == id) {
                Some(stored) => {
                    apply(stored);
                    Ok(Some(stored.clone()))
                }
                None => Ok(None),
            }
        }
    }

    fn remove_listing(
        &self,
        id: ListingId,
    ) -> impl Future<Output = Result<Option<Listing>>> + Send {
        let listings = Arc::clone(&self.listings);

        async move {
            let mut guard = listings
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?;

            let position = guard.iter().position(|l| l.id == id);
            Ok(position.map(|index| guard.remove(index)))
        }
    }

    fn insert_review(&self, review: &Review) -> impl Future<Output = Result<()>> + Send {
        let reviews = Arc::clone(&self.reviews);
        let review = review.clone();

        async move {
            reviews
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .insert(review.id, review);
            Ok(())
        }
    }

    fn review(&self, id: ReviewId) -> impl Future<Output = Result<Option<Review>>> + Send {
        let reviews = Arc::clone(&self.reviews);

        async move {
            Ok(reviews
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .get(&id)
                .cloned())
        }
    }

    fn remove_review(&self, id: ReviewId) -> impl Future<Output = Result<bool>> + Send {
        let reviews = Arc::clone(&self.reviews);

        async move {
            Ok(reviews
                .lock()
                .map_err(|_| CoreError::StoreError("Mutex lock failed".to_string()))?
                .remove(&id)
                .is_some())
        }
    }
}
