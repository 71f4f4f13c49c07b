//! HMAC-SHA512 request signing for itBit's authenticated endpoints.
//!
//! The signature is computed as:
//! ```text
//! HMAC-SHA512(url + SHA256(nonce + json([method, url, body, nonce, timestamp])), secret)
//! ```
//!
//! It is base64-encoded and sent as `authorization: <client_key>:<signature>`
//! together with the `x-auth-nonce` and `x-auth-timestamp` headers.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sha2::{Digest, Sha256, Sha512};

use crate::auth::canonical::{SigningContext, canonical_message};
use crate::auth::{
    Clock, Credentials, CredentialsProvider, IncreasingNonce, NonceProvider, SystemClock,
};
use crate::error::ItbitError;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying `<client_key>:<signature>`.
pub const AUTHORIZATION: &str = "authorization";
/// Header carrying the signed timestamp.
pub const X_AUTH_TIMESTAMP: &str = "x-auth-timestamp";
/// Header carrying the signed nonce.
pub const X_AUTH_NONCE: &str = "x-auth-nonce";
/// Content type header, set on every request.
pub const CONTENT_TYPE: &str = "content-type";
/// The only body encoding itBit accepts.
pub const APPLICATION_JSON: &str = "application/json";

/// A raw HMAC-SHA512 request signature (64 bytes).
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// The raw HMAC output.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Standard padded base64, the encoding used on the wire.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// Upper-case hex.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

/// Compute the signature of a request context with the given secret.
pub fn compute_signature(secret: &[u8], context: &SigningContext) -> Result<Signature, ItbitError> {
    let message = canonical_message(context)?;
    let digest = Sha256::digest(&message);

    let mut hmac = HmacSha512::new_from_slice(secret)
        .map_err(|e| ItbitError::Config(format!("Invalid HMAC key: {e}")))?;
    hmac.update(context.url().as_bytes());
    hmac.update(&digest);

    Ok(Signature {
        bytes: hmac.finalize().into_bytes().to_vec(),
    })
}

/// The headers attached to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `<client_key>:<base64 signature>`
    pub authorization: String,
    /// Milliseconds since the UNIX epoch, as signed.
    pub timestamp: u64,
    /// Nonce, as signed.
    pub nonce: u64,
}

impl AuthHeaders {
    /// Header name/value pairs, lower-case names, `content-type` included.
    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            (AUTHORIZATION, self.authorization.clone()),
            (X_AUTH_TIMESTAMP, self.timestamp.to_string()),
            (X_AUTH_NONCE, self.nonce.to_string()),
            (CONTENT_TYPE, APPLICATION_JSON.to_string()),
        ]
    }

    /// Convert into a header map, all four headers or none.
    pub fn to_header_map(&self) -> Result<HeaderMap, ItbitError> {
        let mut headers = HeaderMap::with_capacity(4);
        for (name, value) in self.pairs() {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ItbitError::Config(format!("Invalid {name} header value: {e}")))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }
}

/// Credentials must be complete and the client key must fit in a header.
fn check_credentials(credentials: &Credentials) -> Result<(), ItbitError> {
    if !credentials.is_complete() {
        return Err(ItbitError::MissingCredentials);
    }
    HeaderValue::from_str(&credentials.client_key)
        .map_err(|e| ItbitError::Config(format!("Invalid client key: {e}")))?;
    Ok(())
}

/// Sign a fully specified context.
///
/// Deterministic: the same credentials and context always produce the same
/// headers. Fails with [`ItbitError::MissingCredentials`] if the client key
/// or secret is empty, and with [`ItbitError::Config`] if the client key
/// cannot be sent as a header value.
pub fn sign_context(
    credentials: &Credentials,
    context: &SigningContext,
) -> Result<AuthHeaders, ItbitError> {
    check_credentials(credentials)?;

    let signature = compute_signature(credentials.expose_secret().as_bytes(), context)?;

    Ok(AuthHeaders {
        authorization: format!("{}:{}", credentials.client_key, signature.to_base64()),
        timestamp: context.timestamp(),
        nonce: context.nonce(),
    })
}

/// Signs outgoing requests for one set of credentials.
///
/// The signer owns the nonce counter for those credentials, so clones share
/// it and may sign concurrently without ever reusing a nonce.
#[derive(Clone)]
pub struct Signer {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    clock: Arc<dyn Clock>,
}

impl Signer {
    /// Create a signer with a fresh nonce counter and the system clock.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            nonce_provider: Arc::new(IncreasingNonce::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the nonce provider.
    pub fn with_nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = provider;
        self
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The credentials this signer signs with.
    pub fn credentials(&self) -> &Credentials {
        self.credentials.get_credentials()
    }

    /// Sign a request.
    ///
    /// `url` must be the absolute URL exactly as it will be sent. The nonce
    /// is only advanced once the credentials and method have been checked,
    /// so a rejected call leaves the counter untouched.
    pub fn sign(&self, method: &str, url: &str, body: &[u8]) -> Result<AuthHeaders, ItbitError> {
        let credentials = self.credentials.get_credentials();
        check_credentials(credentials)?;
        if method.is_empty() {
            return Err(ItbitError::Config("HTTP method must not be empty".to_string()));
        }

        let timestamp = self.clock.now_millis();
        let nonce = self.nonce_provider.next_nonce();
        let context = SigningContext::new(method, url, body, nonce, timestamp);

        tracing::debug!(
            method = context.method(),
            url = context.url(),
            nonce,
            timestamp,
            "signing request"
        );

        sign_context(credentials, &context)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credentials", self.credentials.get_credentials())
            .finish_non_exhaustive()
    }
}
