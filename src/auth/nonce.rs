//! Nonce generation for itBit API authentication.
//!
//! Every signed request carries a nonce that must be unique and increasing
//! for the lifetime of a credential, otherwise itBit treats the request as
//! a replay and rejects it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for providing nonces for authenticated requests.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A strictly increasing counter.
///
/// The first nonce handed out is `start + 1`. A single atomic increment per
/// call keeps concurrent signers from ever observing the same value.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a counter whose first nonce is 1.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter that resumes after `last`, e.g. the last nonce a
    /// previous process used with the same credentials.
    pub fn starting_at(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    /// The most recently issued nonce (the start value if none was issued).
    pub fn last(&self) -> u64 {
        self.last_nonce.load(Ordering::SeqCst)
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        self.last_nonce.fetch_add(1, Ordering::SeqCst) + 1
    }
}
