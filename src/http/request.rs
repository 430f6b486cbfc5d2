//! Request-side helpers.
//!
//! # Responsibilities
//! - Attach a request ID (UUID v4) as early as possible and echo it back
//! - Read the request ID for log correlation
//! - Resolve per-request credentials from `x-sign` / `x-cons` (raw bytes)

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::bridging::{CredentialSource, Credentials, X_CONS, X_SIGN};

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer generating an `x-request-id` for requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// The request ID, or `"unknown"` when absent.
pub fn request_id(headers: &HeaderMap) -> String {
    header_str(headers, X_REQUEST_ID)
        .unwrap_or("unknown")
        .to_string()
}

/// Credentials for this request, falling back to `defaults` per value.
///
/// Header bytes are forwarded as received, including non-UTF-8 values.
pub fn credentials(
    headers: &HeaderMap,
    defaults: &Credentials,
) -> (Credentials, CredentialSource, CredentialSource) {
    Credentials::resolve(headers.get(X_SIGN), headers.get(X_CONS), defaults)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn defaults() -> Credentials {
        Credentials::new("cfg-sign", "cfg-cons").unwrap()
    }

    #[test]
    fn test_credentials_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(X_SIGN, HeaderValue::from_static("hdr-sign"));
        headers.insert(X_CONS, HeaderValue::from_static("hdr-cons"));

        let (creds, sign_src, cons_src) = credentials(&headers, &defaults());
        assert_eq!(creds, Credentials::new("hdr-sign", "hdr-cons").unwrap());
        assert_eq!(sign_src, CredentialSource::Header);
        assert_eq!(cons_src, CredentialSource::Header);
    }

    #[test]
    fn test_credentials_fall_back_when_absent_or_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(X_SIGN, HeaderValue::from_static(""));

        let (creds, sign_src, cons_src) = credentials(&headers, &defaults());
        assert_eq!(creds, defaults());
        assert_eq!(sign_src, CredentialSource::Config);
        assert_eq!(cons_src, CredentialSource::Config);
    }

    #[test]
    fn test_opaque_header_bytes_are_not_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(X_CONS, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());

        let (creds, sign_src, cons_src) = credentials(&headers, &defaults());
        assert_eq!(creds.consumer.as_bytes(), &[0xff, 0xfe]);
        assert_eq!(creds.sign, defaults().sign);
        assert_eq!(sign_src, CredentialSource::Config);
        assert_eq!(cons_src, CredentialSource::Header);
    }

    #[test]
    fn test_request_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }
}
