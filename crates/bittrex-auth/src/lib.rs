//! Authentication primitives for the Bittrex v1.1 REST API
//!
//! Private Bittrex calls carry the API key and a nonce in the query string and
//! an `apisign` header holding the HMAC-SHA512 of the complete request URL.
//! This crate owns the pieces of that scheme that touch the secret:
//!
//! - [`Credentials`] - API key plus a secret that is zeroized on drop
//! - [`generate_nonce`] - strictly increasing nonce source
//! - [`RequestSigner`] - binds credentials to one fresh nonce and signs a URL
//!
//! # Example
//!
//! ```
//! use bittrex_auth::{Credentials, RequestSigner};
//!
//! let creds = Credentials::new("my-key", "my-secret");
//! let signer = RequestSigner::new(&creds);
//!
//! let url = format!(
//!     "https://bittrex.com/api/v1.1/account/getbalances?apikey={}&nonce={}",
//!     signer.api_key(),
//!     signer.nonce()
//! );
//! let apisign = signer.sign(&url);
//! assert_eq!(apisign.len(), 128);
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
pub use nonce::generate_nonce;
