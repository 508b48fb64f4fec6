//! Attempt-level error taxonomy.

use thiserror::Error;

use crate::config::HeaderParseError;
use crate::request::BuildError;
use crate::template::TemplateError;
use crate::transport::TransportError;

/// Everything that can fail a single webhook attempt.
///
/// All variants are caught at the attempt boundary and converted into a
/// terminal failed outcome plus an audit entry; none propagate to the
/// upstream caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The body template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The stored header string could not be parsed.
    #[error(transparent)]
    Header(#[from] HeaderParseError),

    /// The HTTP call itself failed (connection, DNS, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a 4xx/5xx status.
    #[error("HTTP error status {status}: {body}")]
    HttpStatus {
        /// The raw HTTP status.
        status: http::StatusCode,
        /// The raw response body text.
        body: String,
    },

    /// The transport succeeded but the classified status is not 200.
    #[error("Classified status {classified} (HTTP {http_status}): {body}")]
    ClassifiedStatus {
        /// Effective status extracted by the classifier.
        classified: u16,
        /// The raw HTTP status of the response.
        http_status: http::StatusCode,
        /// The raw response body text.
        body: String,
    },

    /// Any other unexpected failure, e.g. the audit store erroring.
    #[error("Internal error during webhook execution: {0}")]
    Internal(String),
}

impl From<BuildError> for WebhookError {
    fn from(error: BuildError) -> Self {
        match error {
            BuildError::Template(e) => Self::Template(e),
            BuildError::Header(e) => Self::Header(e),
            BuildError::Endpoint { url, source } => {
                Self::Transport(TransportError::InvalidUrl(format!("{url}: {source}")))
            }
        }
    }
}

/// Failure category recorded in diagnostics.
///
/// Classification is done by matching [`WebhookError`] variants, never by
/// re-raising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 4xx/5xx response, or a non-200 classified status.
    HttpStatus,
    /// Connection or DNS failure.
    Connection,
    /// The request timed out.
    Timeout,
    /// Any other request-level failure (e.g. an unusable endpoint).
    OtherRequest,
    /// Everything else: template, header, store or logic failures.
    Internal,
}

impl WebhookError {
    /// Maps the error to its diagnostic category.
    ///
    /// A non-200 classified status counts as an HTTP status failure, the
    /// same bucket as a raised 4xx/5xx.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::HttpStatus { .. } | Self::ClassifiedStatus { .. } => FailureKind::HttpStatus,
            Self::Transport(TransportError::Connection(_)) => FailureKind::Connection,
            Self::Transport(TransportError::Timeout) => FailureKind::Timeout,
            Self::Transport(TransportError::InvalidUrl(_)) => FailureKind::OtherRequest,
            Self::Template(_) | Self::Header(_) | Self::Internal(_) => FailureKind::Internal,
        }
    }
}
