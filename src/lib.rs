//! # Lodgekeep
//!
//! Ownership-gated listings-and-reviews core. Authenticated users publish
//! listings, other users attach reviews, and owners moderate and remove
//! their own listings — with the guarantee that deleting a listing also
//! removes every review that belongs to it, leaving no orphaned or
//! dangling child records.
//!
//! The crate covers three concerns:
//!
//! - **Sessions**: credential verification and session identity
//!   ([`SessionManager`]).
//! - **Authorization**: a pure ownership policy over mutations
//!   ([`guard::authorize`]).
//! - **Lifecycle**: listing/review mutations that preserve the
//!   parent/child invariant, including cascade deletion
//!   ([`Lifecycle`]).
//!
//! Routing, rendering, and concrete persistence live outside this crate.
//! External dependencies are injected through the traits in [`providers`];
//! in-memory implementations for testing live in [`mocks`].
//!
//! ## Pipeline
//!
//! Each request runs a sequential pipeline:
//!
//! ```text
//! resolve(session) → Principal → authorize(mutation) → mutate(store)
//! ```
//!
//! No mutation happens before authentication and authorization both pass.
//!
//! ## Example
//!
//! ```
//! use lodgekeep::mocks::MockAggregateStore;
//! use lodgekeep::{Lifecycle, ListingDraft, Principal};
//!
//! # async fn example() -> lodgekeep::Result<()> {
//! let lifecycle = Lifecycle::new(MockAggregateStore::new());
//!
//! // Anonymous callers cannot publish.
//! let draft = ListingDraft::new("Lakeview", "Geneva", "lake.jpg", 200, "By the water");
//! assert!(lifecycle.create_listing(&Principal::Anonymous, draft).await.is_err());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod providers;
pub mod session;
pub mod state;
pub mod validate;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use error::{CoreError, Entity, Result};
pub use guard::{Decision, DenyReason, Mutation};
pub use lifecycle::Lifecycle;
pub use session::SessionManager;
pub use state::{
    Identity, Listing, ListingDraft, ListingId, Principal, Review, ReviewId, Session, SessionId,
    UserId,
};
pub use validate::{FieldError, FieldErrors};
