//! Decides whether a submitted credential opens the admin space.
//!
//! The kiosk uses a single shared password with no accounts, lockout or
//! sessions: every visit to the admin space asks for it again. The check
//! sits behind [Authorizer] so it can be swapped for a real credential
//! store without changing the ledger or report code.

use std::fmt::Debug;

use sha2::{Digest, Sha512};

/// The outcome of checking a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// Nothing was entered yet.
    AwaitingCredential,
    /// The credential is correct.
    Granted,
    /// The credential is wrong.
    Denied,
}

/// Checks credentials for the admin space.
pub trait Authorizer: Send + Sync + Debug {
    /// Check `credential`, the raw text entered by the user.
    fn authorize(&self, credential: &str) -> Authorization;
}

/// A single secret shared by everyone allowed into the admin space.
///
/// Only the SHA-512 digest of the secret is kept in memory, and credentials
/// are compared by digest.
#[derive(Clone)]
pub struct SharedSecret {
    digest: Vec<u8>,
}

impl SharedSecret {
    /// Create the gate for `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha512::digest(secret.as_bytes()).to_vec(),
        }
    }
}

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("digest", &"********")
            .finish()
    }
}

impl Authorizer for SharedSecret {
    fn authorize(&self, credential: &str) -> Authorization {
        if credential.is_empty() {
            return Authorization::AwaitingCredential;
        }

        if Sha512::digest(credential.as_bytes()).as_slice() == self.digest.as_slice() {
            Authorization::Granted
        } else {
            Authorization::Denied
        }
    }
}
