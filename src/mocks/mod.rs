//! Mock provider implementations for testing.
//!
//! Simple, in-memory implementations of the provider traits for use in
//! unit and integration tests. Enabled by the default-on `test-utils`
//! feature.

pub mod aggregate;
pub mod session;
pub mod user;

pub use aggregate::MockAggregateStore;
pub use session::MockSessionStore;
pub use user::MockUserRepository;
