//! Integration tests for authorization at the lifecycle boundary.
//!
//! The guard itself is unit-tested in `src/guard.rs`; these tests pin the
//! contract that every denial short-circuits before any store write.

use lodgekeep::mocks::MockAggregateStore;
use lodgekeep::{CoreError, Identity, Lifecycle, ListingDraft, Principal, UserId};

fn authenticated(username: &str) -> Principal {
    Principal::Authenticated(Identity {
        user_id: UserId::new(),
        username: username.into(),
    })
}

fn valid_draft() -> ListingDraft {
    ListingDraft::new("Lakeview", "Geneva", "lake.jpg", 200, "By the water")
}

#[tokio::test]
async fn anonymous_create_listing_writes_nothing() {
    let store = MockAggregateStore::new();
    let lifecycle = Lifecycle::new(store.clone());

    let result = lifecycle
        .create_listing(&Principal::Anonymous, valid_draft())
        .await;
    assert_eq!(result.unwrap_err(), CoreError::NotAuthenticated);
    assert_eq!(store.listing_count().expect("count"), 0);
}

#[tokio::test]
async fn non_owner_edit_is_denied_regardless_of_payload() {
    let lifecycle = Lifecycle::new(MockAggregateStore::new());
    let owner = authenticated("alice");
    let stranger = authenticated("mallory");

    let listing = lifecycle
        .create_listing(&owner, valid_draft())
        .await
        .expect("create");

    // Valid payload: still denied.
    let valid = lifecycle
        .edit_listing(listing.id, valid_draft(), &stranger)
        .await;
    assert_eq!(valid.unwrap_err(), CoreError::NotOwner);

    // Invalid payload: authorization is checked first, so the answer is
    // identical.
    let invalid = lifecycle
        .edit_listing(listing.id, ListingDraft::new("", "", "", 0, ""), &stranger)
        .await;
    assert_eq!(invalid.unwrap_err(), CoreError::NotOwner);
}

#[tokio::test]
async fn non_owner_delete_is_denied_and_listing_survives() {
    let lifecycle = Lifecycle::new(MockAggregateStore::new());
    let owner = authenticated("alice");
    let stranger = authenticated("mallory");

    let listing = lifecycle
        .create_listing(&owner, valid_draft())
        .await
        .expect("create");

    let result = lifecycle.delete_listing(listing.id, &stranger).await;
    assert_eq!(result.unwrap_err(), CoreError::NotOwner);
    assert!(lifecycle.listing(listing.id).await.is_ok());
}

#[tokio::test]
async fn self_review_is_rejected_for_any_text() {
    let store = MockAggregateStore::new();
    let lifecycle = Lifecycle::new(store.clone());
    let owner = authenticated("alice");

    let listing = lifecycle
        .create_listing(&owner, valid_draft())
        .await
        .expect("create");

    for text in ["Great stay", "", "x"] {
        let result = lifecycle.create_review(listing.id, &owner, text).await;
        assert_eq!(result.unwrap_err(), CoreError::SelfReview);
    }
    assert_eq!(store.review_count().expect("count"), 0);
}

#[tokio::test]
async fn review_moderation_belongs_to_the_listing_owner() {
    let lifecycle = Lifecycle::new(MockAggregateStore::new());
    let owner = authenticated("alice");
    let reviewer = authenticated("bob");

    let listing = lifecycle
        .create_listing(&owner, valid_draft())
        .await
        .expect("create");
    let review = lifecycle
        .create_review(listing.id, &reviewer, "Great stay")
        .await
        .expect("review");

    // The author cannot delete their own review on someone else's
    // listing.
    let by_author = lifecycle
        .delete_review(listing.id, review.id, &reviewer)
        .await;
    assert_eq!(by_author.unwrap_err(), CoreError::NotOwner);

    // The listing owner moderates.
    lifecycle
        .delete_review(listing.id, review.id, &owner)
        .await
        .expect("owner moderation");
}

#[tokio::test]
async fn validation_collects_every_failing_field() {
    let lifecycle = Lifecycle::new(MockAggregateStore::new());
    let caller = authenticated("alice");

    let result = lifecycle
        .create_listing(&caller, ListingDraft::new("", "", "", 0, ""))
        .await;
    match result.unwrap_err() {
        CoreError::ValidationFailed(errors) => {
            let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
            assert_eq!(fields, vec!["title", "location", "image", "price", "text"]);
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn edit_cannot_touch_owner_or_review_set() {
    let lifecycle = Lifecycle::new(MockAggregateStore::new());
    let owner = authenticated("alice");
    let reviewer = authenticated("bob");

    let listing = lifecycle
        .create_listing(&owner, valid_draft())
        .await
        .expect("create");
    let review = lifecycle
        .create_review(listing.id, &reviewer, "Great stay")
        .await
        .expect("review");

    let edited = lifecycle
        .edit_listing(
            listing.id,
            ListingDraft::new("Hillview", "Zermatt", "hill.jpg", 300, "Up high"),
            &owner,
        )
        .await
        .expect("edit");

    assert_eq!(edited.title, "Hillview");
    assert_eq!(edited.owner, listing.owner);
    assert_eq!(edited.reviews, vec![review.id]);
}
