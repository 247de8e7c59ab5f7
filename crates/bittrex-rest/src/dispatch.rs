//! Call dispatch and envelope decoding
//!
//! One GET per call, no retries. The envelope is decoded first and `result`
//! is only turned into the caller's type once `success` is confirmed, so a
//! rejected call never produces a defaulted payload.

use crate::error::{RestError, RestResult};
use crate::request::SignedRequest;
use crate::types::ApiResult;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tracing::{debug, trace};

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "apisign";

/// Send a signed request and decode its payload as `T`
pub async fn dispatch<T: DeserializeOwned>(
    http_client: &Client,
    request: &SignedRequest,
) -> RestResult<T> {
    let mut builder = http_client.get(request.url());
    if let Some(signature) = request.signature() {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    debug!(method = request.method(), status = status.as_u16(), "Received response");
    trace!(bytes = body.len(), "Response body");

    if !status.is_success() {
        return Err(status_error(status.as_u16(), &body));
    }

    decode_envelope(&body)
}

/// Decode a response body into the envelope and unwrap its payload
///
/// A `null` or missing `result` on success decodes only into types that
/// accept null, such as `()` or `Option<_>`.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    let envelope: ApiResult<Value> = serde_json::from_slice(body)?;
    let payload = envelope
        .into_result()
        .map_err(RestError::ApiRejected)?
        .unwrap_or(Value::Null);

    Ok(serde_json::from_value(payload)?)
}

/// Error for a non-success status, preferring the server's own rejection
fn status_error(status: u16, body: &[u8]) -> RestError {
    match serde_json::from_slice::<ApiResult<IgnoredAny>>(body) {
        Ok(envelope) if !envelope.success => RestError::ApiRejected(envelope.message),
        _ => RestError::HttpStatus {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaceOrderResult, TickerResult};
    use rust_decimal_macros::dec;

    #[test]
    fn test_decode_ticker() {
        let body = br#"{"success":true,"message":"","result":{"Bid":100.5,"Ask":101.0,"Last":100.8}}"#;
        let ticker: TickerResult = decode_envelope(body).unwrap();
        assert_eq!(ticker.bid, dec!(100.5));
        assert_eq!(ticker.ask, dec!(101.0));
        assert_eq!(ticker.last, dec!(100.8));
    }

    #[test]
    fn test_rejected_envelope() {
        let body = br#"{"success":false,"message":"INVALID_MARKET","result":null}"#;
        let err = decode_envelope::<TickerResult>(body).unwrap_err();
        assert!(matches!(err, RestError::ApiRejected(ref message) if message == "INVALID_MARKET"));
    }

    #[test]
    fn test_rejected_envelope_skips_payload_decoding() {
        // result would not decode as a ticker; rejection must still win
        let body = br#"{"success":false,"message":"APIKEY_INVALID","result":[1,2,3]}"#;
        let err = decode_envelope::<TickerResult>(body).unwrap_err();
        assert_eq!(err.rejection_message(), Some("APIKEY_INVALID"));
    }

    #[test]
    fn test_malformed_json() {
        let err = decode_envelope::<TickerResult>(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_envelope_missing_success() {
        let err = decode_envelope::<TickerResult>(br#"{"message":"","result":{}}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_payload_shape_mismatch() {
        let body = br#"{"success":true,"message":"","result":"not an object"}"#;
        let err = decode_envelope::<TickerResult>(body).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_null_result_on_success() {
        let body = br#"{"success":true,"message":"","result":null}"#;
        decode_envelope::<()>(body).unwrap();

        let err = decode_envelope::<PlaceOrderResult>(body).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_status_error_prefers_rejection() {
        let err = status_error(400, br#"{"success":false,"message":"NONCE_USED","result":null}"#);
        assert_eq!(err.rejection_message(), Some("NONCE_USED"));

        let err = status_error(503, b"");
        assert!(matches!(err, RestError::HttpStatus { status: 503, .. }));
    }
}
