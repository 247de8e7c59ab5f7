//! API credentials for Bittrex private endpoints
//!
//! Implements the v1.1 signing scheme: HMAC-SHA512 keyed with the raw API
//! secret over the exact bytes of the request URL, hex-encoded in uppercase.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Keeps the secret out of `Debug` output
//! - Requires explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use tracing::trace;

use crate::error::{AuthError, AuthResult};
use crate::nonce::generate_nonce;

type HmacSha512 = Hmac<Sha512>;

const API_KEY_ENV: &str = "BITTREX_API_KEY";
const API_SECRET_ENV: &str = "BITTREX_API_SECRET";

/// API key and secret for authenticated requests
///
/// `Credentials::default()` is the empty pair used by clients that only call
/// public endpoints.
pub struct Credentials {
    /// API key (sent in the query string)
    api_key: String,
    /// API secret (never sent, zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITTREX_API_KEY` and `BITTREX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(format!(
                "{API_KEY_ENV} and {API_SECRET_ENV} must not be empty"
            )));
        }

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// True when neither a key nor a secret is set
    pub fn is_empty(&self) -> bool {
        self.api_key.is_empty() && self.api_secret.expose_secret().is_empty()
    }

    /// Sign a fully assembled request URL
    ///
    /// Returns the uppercase hex HMAC-SHA512 of the URL's UTF-8 bytes, keyed
    /// with the secret's UTF-8 bytes. This is the `apisign` header value.
    pub fn sign(&self, url: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(url.as_bytes());
        hex::encode_upper(mac.finalize().into_bytes())
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key_prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{key_prefix}..."))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Signer for a single private request
///
/// Draws its nonce on construction, so the nonce reflects the moment the
/// request was built rather than when it is sent.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonce: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer with a fresh nonce
    pub fn new(credentials: &'a Credentials) -> Self {
        let nonce = generate_nonce();
        trace!(nonce, "Drew request nonce");
        Self { credentials, nonce }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the final request URL
    pub fn sign(&self, url: &str) -> String {
        self.credentials.sign(url)
    }
}
