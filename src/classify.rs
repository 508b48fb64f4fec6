//! Response status classification.
//!
//! Some GraphQL endpoints return HTTP 200 while carrying the real outcome
//! inside the response body. Classification extracts that embedded status
//! so the outcome handler can treat the attempt as failed despite a
//! successful transport.

use serde_json::Value;

use crate::config::RequestType;
use crate::transport::HttpResponse;

/// Determines the effective outcome status of a response.
///
/// For anything but [`RequestType::Graphql`] this is the HTTP status. For
/// GraphQL responses the body is parsed as JSON; if it carries an object
/// `data` field, every top-level value under `data` that is itself an
/// object is scanned for a `statusCode` key, and the last one found
/// overrides the HTTP status. Object key iteration order is not
/// guaranteed, so with multiple matches any of them may win. An embedded
/// value that is not a status-sized number still overrides but can never
/// equal 200, so it fails the attempt; it is reported as 0.
///
/// Classification never errors: an empty body, malformed JSON, or a
/// non-object `data` all fall back to the HTTP status.
///
/// # Example
///
/// ```
/// use outhook::classify::classify;
/// use outhook::config::RequestType;
/// use outhook::transport::HttpResponse;
///
/// let response = HttpResponse::new(
///     http::StatusCode::OK,
///     http::HeaderMap::new(),
///     br#"{"data": {"x": {"statusCode": 404}}}"#.to_vec(),
/// );
///
/// assert_eq!(classify(&response, RequestType::Graphql), 404);
/// assert_eq!(classify(&response, RequestType::Request), 200);
/// ```
#[must_use]
pub fn classify(response: &HttpResponse, request_type: RequestType) -> u16 {
    let status = response.status.as_u16();

    if request_type != RequestType::Graphql {
        return status;
    }

    let Some(text) = response.body_text() else {
        return status;
    };
    if text.is_empty() {
        return status;
    }
    let Ok(parsed) = serde_json::from_str::<Value>(text) else {
        return status;
    };
    let Some(data) = parsed.get("data").and_then(Value::as_object) else {
        return status;
    };

    let mut embedded = None;
    for entry in data.values() {
        let Some(object) = entry.as_object() else {
            continue;
        };
        if let Some(code) = object.get("statusCode") {
            embedded = Some(code);
        }
    }

    match embedded {
        None => status,
        // A present statusCode always wins; a value that is not a
        // status-sized number cannot equal 200 and fails the attempt.
        Some(code) => code
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(0),
    }
}
