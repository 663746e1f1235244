//! Response decoding and status classification

use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::Value;

use crate::error::{Error, FALLBACK_MESSAGE};

/// Decode a response body without reshaping it
///
/// JSON bodies come back as parsed JSON, an empty body as `null`, anything
/// else as a JSON string holding the raw text.
pub(crate) fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Pick the error message out of a response body
///
/// Uses `message`, then `detail`, then a fixed fallback. Empty strings count
/// as absent.
pub(crate) fn error_message(body: &Value) -> String {
    ["message", "detail"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::String(_) | Value::Null | Value::Bool(false) => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// Parse the leading integer of a `retry-after` header
///
/// HTTP-date values carry no leading digits and yield `None`.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<u64> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Classify a non-success response
pub(crate) fn classify_status(status: u16, headers: &HeaderMap, raw_body: &[u8]) -> Error {
    let body = decode_body(raw_body);
    let message = error_message(&body);

    match status {
        401 | 403 => Error::Authentication { message },
        429 => Error::RateLimit {
            message,
            retry_after: retry_after(headers),
        },
        400..=499 => Error::Validation { message },
        _ => Error::Api {
            message,
            status,
            body: String::from_utf8_lossy(raw_body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn headers_with_retry(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_str(value).expect("Valid header value"),
        );
        headers
    }

    #[test]
    fn test_decode_json_unmodified() {
        let body = br#"{"status":"ok","data":{"code_id":"abc","nested":[1,2]}}"#;
        assert_eq!(
            decode_body(body),
            json!({"status": "ok", "data": {"code_id": "abc", "nested": [1, 2]}})
        );
    }

    #[test]
    fn test_decode_empty_and_text() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \n"), Value::Null);
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
    }

    #[test]
    fn test_error_message_precedence() {
        assert_eq!(
            error_message(&json!({"message": "m", "detail": "d"})),
            "m"
        );
        assert_eq!(error_message(&json!({"detail": "d"})), "d");
        assert_eq!(error_message(&json!({"message": "", "detail": "d"})), "d");
        assert_eq!(error_message(&json!({"error": "x"})), FALLBACK_MESSAGE);
        assert_eq!(error_message(&json!("not an object")), FALLBACK_MESSAGE);
        assert_eq!(error_message(&Value::Null), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_retry_after_parsing() {
        assert_eq!(retry_after(&headers_with_retry("30")), Some(30));
        assert_eq!(retry_after(&headers_with_retry(" 12 ")), Some(12));
        assert_eq!(retry_after(&headers_with_retry("45.5")), Some(45));
        assert_eq!(
            retry_after(&headers_with_retry("Wed, 21 Oct 2015 07:28:00 GMT")),
            None
        );
        assert_eq!(retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn test_classify_auth_statuses() {
        for status in [401, 403] {
            let err = classify_status(status, &HeaderMap::new(), br#"{"detail":"Bad key"}"#);
            assert_eq!(err.kind(), ErrorKind::Authentication);
            assert_eq!(err.message(), "Bad key");
        }
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_status(429, &headers_with_retry("30"), br#"{"message":"Slow down"}"#);
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.retry_after(), Some(30));
        assert_eq!(err.message(), "Slow down");

        let err = classify_status(429, &HeaderMap::new(), b"");
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_classify_other_client_errors() {
        for status in [400, 404, 418, 422, 499] {
            let err = classify_status(status, &HeaderMap::new(), b"{}");
            assert_eq!(err.kind(), ErrorKind::Validation, "status {status}");
        }
    }

    #[test]
    fn test_classify_server_errors_keep_raw_body() {
        let raw = br#"{"message":"Database down"}"#;
        let err = classify_status(503, &HeaderMap::new(), raw);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.body(), Some(r#"{"message":"Database down"}"#));
        assert_eq!(err.message(), "Database down");
    }

    #[test]
    fn test_classify_unexpected_status_as_api() {
        let err = classify_status(304, &HeaderMap::new(), b"");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(304));
    }
}
