//! Request assembly and signing
//!
//! Turns a method path and its parameters into the exact URL Bittrex expects.
//! Private calls get `apikey` and `nonce` appended before the URL is signed,
//! since the server recomputes the HMAC over the bytes it receives.
//!
//! Parameter values are written as given. The assembled URL is normalized by
//! the same parser the transport uses before it is signed, so the signature
//! always covers the bytes on the wire. That normalization escapes spaces and
//! non-ASCII text but leaves `&` and `=` alone; a value containing those must
//! be escaped by the caller before it reaches the descriptor.

use bittrex_auth::{Credentials, RequestSigner};
use reqwest::Url;

/// Prefix that marks a method path as public
const PUBLIC_PREFIX: &str = "public";

/// A logical API call: method path plus ordered query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: String,
    params: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Start a descriptor for `method`, e.g. `"public/getticker"`
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter, keeping insertion order
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present
    pub fn optional_param(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Method path as given
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Query parameters in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Public methods are never signed
    pub fn is_public(&self) -> bool {
        self.method
            .trim()
            .to_lowercase()
            .starts_with(PUBLIC_PREFIX)
    }
}

/// Final URL plus the `apisign` header value for private calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    url: String,
    signature: Option<String>,
}

impl SignedRequest {
    /// Method path this request was built from
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Complete request URL, query string included
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hex HMAC-SHA512 of [`url`](Self::url), present only for private calls
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

/// Build the request URL and, for private methods, its signature
///
/// Never fails: a URL the parser refuses is kept as assembled and the
/// transport reports it when sent. Empty credentials on a private method
/// still produce a signed request.
pub fn build_request(
    base_url: &str,
    descriptor: &RequestDescriptor,
    credentials: &Credentials,
) -> SignedRequest {
    let mut url = format!("{}/{}", base_url, descriptor.method);

    let query = descriptor
        .params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    if descriptor.is_public() {
        return SignedRequest {
            method: descriptor.method.clone(),
            url: normalize(url),
            signature: None,
        };
    }

    let signer = RequestSigner::new(credentials);
    url.push(if query.is_empty() { '?' } else { '&' });
    url.push_str(&format!("apikey={}&nonce={}", signer.api_key(), signer.nonce()));

    let url = normalize(url);
    let signature = signer.sign(&url);

    SignedRequest {
        method: descriptor.method.clone(),
        url,
        signature: Some(signature),
    }
}

/// Serialize `url` the way the transport will send it
fn normalize(url: String) -> String {
    match Url::parse(&url) {
        Ok(parsed) => parsed.into(),
        Err(_) => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha512;

    const BASE: &str = "https://bittrex.com/api/v1.1";

    fn oracle(secret: &str, url: &str) -> String {
        let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(url.as_bytes());
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect()
    }

    fn nonce_of(url: &str) -> u64 {
        url.rsplit("nonce=").next().unwrap().parse().unwrap()
    }

    #[test]
    fn test_public_orderbook_url() {
        let descriptor = RequestDescriptor::new("public/getorderbook")
            .param("market", "BTC-LTC")
            .param("type", "both");

        let request = build_request(BASE, &descriptor, &Credentials::default());

        assert_eq!(
            request.url(),
            "https://bittrex.com/api/v1.1/public/getorderbook?market=BTC-LTC&type=both"
        );
        assert_eq!(request.signature(), None);
    }

    #[test]
    fn test_public_never_signed_with_credentials() {
        let creds = Credentials::new("key", "secret");
        for method in ["public/getmarkets", "PUBLIC/getticker", "  Public/getcurrencies"] {
            let request = build_request(BASE, &RequestDescriptor::new(method), &creds);
            assert!(!request.url().contains("apikey"), "{method} carries apikey");
            assert!(!request.url().contains("nonce"), "{method} carries nonce");
            assert!(request.signature().is_none());
        }
    }

    #[test]
    fn test_private_without_params() {
        let creds = Credentials::new("KEY", "SECRET");
        let request = build_request(BASE, &RequestDescriptor::new("account/getbalances"), &creds);

        let prefix = "https://bittrex.com/api/v1.1/account/getbalances?apikey=KEY&nonce=";
        assert!(request.url().starts_with(prefix));
        assert!(nonce_of(request.url()) > 0);
    }

    #[test]
    fn test_private_with_params() {
        let creds = Credentials::new("KEY", "SECRET");
        let descriptor = RequestDescriptor::new("market/buylimit")
            .param("market", "BTC-LTC")
            .param("quantity", "1.5")
            .param("rate", "0.0123");

        let request = build_request(BASE, &descriptor, &creds);

        let prefix = "https://bittrex.com/api/v1.1/market/buylimit?market=BTC-LTC&quantity=1.5&rate=0.0123&apikey=KEY&nonce=";
        assert!(request.url().starts_with(prefix));
    }

    #[test]
    fn test_signature_matches_oracle() {
        let creds = Credentials::new("KEY", "SECRET");
        let descriptor = RequestDescriptor::new("account/getbalance").param("currency", "BTC");

        let request = build_request(BASE, &descriptor, &creds);

        assert_eq!(request.signature(), Some(oracle("SECRET", request.url()).as_str()));
    }

    #[test]
    fn test_successive_private_nonces_differ() {
        let creds = Credentials::new("KEY", "SECRET");
        let descriptor = RequestDescriptor::new("market/getopenorders");

        let first = build_request(BASE, &descriptor, &creds);
        let second = build_request(BASE, &descriptor, &creds);

        assert!(nonce_of(second.url()) > nonce_of(first.url()));
        assert_ne!(first.signature(), second.signature());
    }

    #[test]
    fn test_empty_credentials_still_signed_for_private() {
        let request = build_request(
            BASE,
            &RequestDescriptor::new("account/getbalances"),
            &Credentials::default(),
        );
        assert!(request.url().contains("?apikey=&nonce="));
        assert_eq!(request.signature(), Some(oracle("", request.url()).as_str()));
    }

    #[test]
    fn test_signed_url_is_wire_form() {
        let creds = Credentials::new("KEY", "SECRET");
        let descriptor = RequestDescriptor::new("account/withdraw")
            .param("currency", "XRP")
            .param("paymentid", "memo 42\u{e9}");

        let request = build_request(BASE, &descriptor, &creds);

        assert!(request
            .url()
            .starts_with("https://bittrex.com/api/v1.1/account/withdraw?currency=XRP&paymentid=memo%2042%C3%A9&apikey=KEY&nonce="));
        assert_eq!(Url::parse(request.url()).unwrap().as_str(), request.url());
        assert_eq!(request.signature(), Some(oracle("SECRET", request.url()).as_str()));
    }

    #[test]
    fn test_unparseable_base_kept_as_assembled() {
        let request = build_request(
            "not a url",
            &RequestDescriptor::new("public/getmarkets"),
            &Credentials::default(),
        );
        assert_eq!(request.url(), "not a url/public/getmarkets");
    }

    #[test]
    fn test_optional_param() {
        let descriptor = RequestDescriptor::new("account/getorderhistory")
            .optional_param("market", None::<&str>)
            .optional_param("currency", Some("BTC"));
        assert_eq!(descriptor.params(), &[("currency".to_string(), "BTC".to_string())]);
    }

    #[test]
    fn test_is_public() {
        assert!(RequestDescriptor::new("public/getticker").is_public());
        assert!(RequestDescriptor::new(" PublicThing ").is_public());
        assert!(!RequestDescriptor::new("market/cancel").is_public());
        assert!(!RequestDescriptor::new("account/public").is_public());
    }
}
