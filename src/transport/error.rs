//! Error type for transport-level failures.

use thiserror::Error;

/// Error type for a failed HTTP dispatch.
///
/// Describes what went wrong on the wire; the outcome handler maps each
/// variant to a failure category for diagnostics. There is no retry in
/// this crate, so these are terminal for the attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the fixed per-request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from its parts.
    ///
    /// This indicates a configuration error (typically a bad endpoint)
    /// rather than a transient failure.
    #[error("Invalid request: {0}")]
    InvalidUrl(String),
}
