//! Error type for request construction.

use thiserror::Error;

use crate::config::HeaderParseError;
use crate::template::TemplateError;

/// Error type for building a webhook request.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The body template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The stored header string could not be parsed.
    #[error(transparent)]
    Header(#[from] HeaderParseError),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid endpoint '{url}': {source}")]
    Endpoint {
        /// The configured endpoint string.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}
