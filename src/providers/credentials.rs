//! Credential material and the credential verifier.
//!
//! Credential material is opaque to the rest of the core: a salted
//! one-way digest that supports exactly one operation, a constant-time
//! match against a presented secret. The hashing construction here is a
//! stand-in for whatever the deployment mandates; nothing outside this
//! module depends on it.

use crate::error::{CoreError, Result};
use crate::providers::user::UserRepository;
use crate::state::Identity;
use constant_time_eq::constant_time_eq;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Opaque, rotatable credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl Credential {
    /// Derive credential material from a secret with a fresh random salt.
    #[must_use]
    pub fn derive(secret: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = Self::digest_with(&salt, secret);
        Self { salt, digest }
    }

    /// Constant-time comparison of a presented secret against this
    /// material.
    #[must_use]
    pub fn matches(&self, secret: &str) -> bool {
        let presented = Self::digest_with(&self.salt, secret);
        constant_time_eq(&self.digest, &presented)
    }

    fn digest_with(salt: &[u8; SALT_LEN], secret: &str) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        hasher.finalize().into()
    }

    /// Burn one digest-and-compare cycle without a real credential.
    ///
    /// Called on the unknown-username path so that path costs the same as
    /// a mismatch, keeping the failure shape constant.
    pub(crate) fn burn(secret: &str) {
        let salt = [0u8; SALT_LEN];
        let presented = Self::digest_with(&salt, secret);
        let _ = constant_time_eq(&presented, &[0u8; DIGEST_LEN]);
    }
}

/// Credential verifier over an identity store.
///
/// Read-only: verification never mutates the store. Both failure modes
/// (unknown username, wrong secret) collapse into
/// [`CoreError::InvalidCredentials`]; the distinction is logged
/// internally and never reaches the caller-visible layer.
#[derive(Debug, Clone)]
pub struct CredentialVerifier<U> {
    users: U,
}

impl<U: UserRepository> CredentialVerifier<U> {
    /// Create a verifier over the given identity store.
    pub const fn new(users: U) -> Self {
        Self { users }
    }

    /// Verify a presented username/secret pair.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCredentials` on any verification
    /// failure, `CoreError::StoreError` if the identity store is
    /// unavailable.
    pub async fn verify(&self, username: &str, secret: &str) -> Result<Identity> {
        match self.users.user_by_username(username).await? {
            Some(user) => {
                if user.credential.matches(secret) {
                    Ok(Identity {
                        user_id: user.user_id,
                        username: user.username,
                    })
                } else {
                    tracing::debug!(username, "credential mismatch");
                    Err(CoreError::InvalidCredentials)
                }
            }
            None => {
                Credential::burn(secret);
                tracing::debug!(username, "unknown username");
                Err(CoreError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_material_matches_its_secret() {
        let credential = Credential::derive("hunter2");
        assert!(credential.matches("hunter2"));
        assert!(!credential.matches("hunter3"));
    }

    #[test]
    fn same_secret_derives_distinct_material() {
        // Fresh salt per derivation.
        let a = Credential::derive("hunter2");
        let b = Credential::derive("hunter2");
        assert_ne!(a, b);
        assert!(a.matches("hunter2"));
        assert!(b.matches("hunter2"));
    }
}
