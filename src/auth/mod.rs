//! Authentication module for the itBit API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce and timestamp sources for replay protection
//! - The canonical request form and HMAC-SHA512 request signing

mod canonical;
mod clock;
mod credentials;
mod nonce;
mod signature;

pub use canonical::{SigningContext, canonical_message};
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{
    CLIENT_KEY_VAR, CLIENT_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::{
    APPLICATION_JSON, AUTHORIZATION, AuthHeaders, CONTENT_TYPE, Signature, Signer, X_AUTH_NONCE,
    X_AUTH_TIMESTAMP, compute_signature, sign_context,
};
