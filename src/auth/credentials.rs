//! itBit API keys.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ItbitError;

/// Environment variable read for the client key.
pub const CLIENT_KEY_VAR: &str = "ITBIT_CLIENT_KEY";
/// Environment variable read for the client secret.
pub const CLIENT_SECRET_VAR: &str = "ITBIT_CLIENT_SECRET";

/// An itBit client key and its secret.
///
/// The key travels in the `authorization` header; the secret only ever keys
/// the HMAC and never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub client_key: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(client_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_key: client_key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// The raw secret, for keying the HMAC.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Signing needs both a key and a secret.
    pub fn is_complete(&self) -> bool {
        !self.client_key.is_empty() && !self.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_key", &self.client_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Source of the credentials a [`Signer`](crate::auth::Signer) signs with.
pub trait CredentialsProvider: Send + Sync {
    fn get_credentials(&self) -> &Credentials;
}

/// Credentials fixed at construction.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    pub fn new(client_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(client_key, secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read once from [`CLIENT_KEY_VAR`] and [`CLIENT_SECRET_VAR`].
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read both variables, failing with [`ItbitError::Config`] naming the
    /// first one that is unset.
    pub fn from_env() -> Result<Self, ItbitError> {
        read_vars(CLIENT_KEY_VAR, CLIENT_SECRET_VAR)
    }
}

fn read_vars(key_var: &str, secret_var: &str) -> Result<EnvCredentials, ItbitError> {
    let read = |name: &str| {
        std::env::var(name).map_err(|e| ItbitError::Config(format!("{name}: {e}")))
    };
    Ok(EnvCredentials {
        credentials: Credentials::new(read(key_var)?, read(secret_var)?),
    })
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
