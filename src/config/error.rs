//! Error type for stored header parsing.

use thiserror::Error;

/// Error type for parsing the stored header string.
///
/// The header string is treated strictly as a JSON object literal with
/// string values; anything else is rejected rather than evaluated.
#[derive(Debug, Error)]
pub enum HeaderParseError {
    /// The stored string is not valid JSON.
    #[error("Headers are not a valid JSON object: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored string parsed to something other than an object.
    #[error("Headers must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type name of the top-level value.
        found: &'static str,
    },

    /// A header value was not a JSON string.
    #[error("Header '{name}' has a non-string value")]
    NonStringValue {
        /// Name of the offending header.
        name: String,
    },

    /// A header name is not a valid HTTP header name.
    #[error("Invalid header name '{name}': {source}")]
    InvalidName {
        /// The invalid name.
        name: String,
        /// Underlying parse error.
        #[source]
        source: http::header::InvalidHeaderName,
    },

    /// A header value is not a valid HTTP header value.
    #[error("Invalid value for header '{name}': {source}")]
    InvalidValue {
        /// Name of the header whose value is invalid.
        name: String,
        /// Underlying parse error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}
