//! Strict parsing of the stored header string.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::HeaderParseError;

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses the stored header string into a header map.
///
/// The string is interpreted strictly as a JSON object literal mapping
/// header names to string values. It is never evaluated as code. An empty
/// or whitespace-only string yields an empty map.
///
/// # Example
///
/// ```
/// use outhook::config::parse_header_map;
///
/// let headers = parse_header_map(r#"{"Authorization": "Bearer t"}"#).unwrap();
/// assert_eq!(headers.get("authorization").unwrap(), "Bearer t");
///
/// assert!(parse_header_map("[1, 2]").is_err());
/// ```
///
/// # Errors
///
/// Returns [`HeaderParseError`] when the string is not valid JSON, the
/// top-level value is not an object, a value is not a string, or a
/// name/value is not a valid HTTP header name/value.
pub fn parse_header_map(raw: &str) -> Result<HeaderMap, HeaderParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(HeaderMap::new());
    }

    let parsed: Value = serde_json::from_str(raw)?;
    let Value::Object(entries) = parsed else {
        return Err(HeaderParseError::NotAnObject {
            found: json_type_name(&parsed),
        });
    };

    let mut headers = HeaderMap::with_capacity(entries.len());
    for (name, value) in entries {
        let Value::String(value) = value else {
            return Err(HeaderParseError::NonStringValue { name });
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                HeaderParseError::InvalidName {
                    name: name.clone(),
                    source,
                }
            })?;
        let header_value =
            HeaderValue::from_str(&value).map_err(|source| HeaderParseError::InvalidValue {
                name: name.clone(),
                source,
            })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
