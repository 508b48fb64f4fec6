//! Append-only audit log for webhook attempts.
//!
//! Every logged attempt becomes one [`WebhookLogEntry`]. Entries are never
//! mutated or deleted by this crate; housekeeping is the store's problem.
//! The [`LogStore`] trait abstracts the persistence backend, and
//! [`MemoryLogStore`] provides an in-process implementation for tests and
//! embedded use.

mod store;


pub use store::MemoryLogStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of the webhook call an entry describes.
///
/// This crate only dispatches outgoing webhooks; the field exists so the
/// store can share a table with inbound tooling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// An outbound call made by this crate.
    #[default]
    Outgoing,
}

/// Audit record of one webhook attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookLogEntry {
    /// Always [`Direction::Outgoing`] for entries created here.
    pub direction: Direction,
    /// Human identifier of the webhook, from the configuration label.
    pub webhook: String,
    /// Target URL of the attempt.
    pub endpoint: String,
    /// Raw stored header string from the configuration.
    pub headers: String,
    /// Rendered request payload, or empty if the failure preceded
    /// rendering.
    pub body: String,
    /// Raw response body on success; stringified error on failure.
    pub response: String,
    /// Raw HTTP status if a response was received, `None` otherwise.
    pub status: Option<u16>,
}

/// Error type for audit store operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The backing store rejected or failed the append.
    #[error("Audit store failure: {0}")]
    Store(String),
}

/// Trait for the audit log persistence backend.
///
/// The store must tolerate concurrent appends; attempts against the same
/// configuration share no locks.
pub trait LogStore: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the backing store fails. The executor
    /// diagnoses and swallows this; a logging failure never fails the
    /// attempt's caller.
    fn create(&self, entry: WebhookLogEntry) -> Result<(), AuditError>;

    /// Returns entries whose webhook label contains the fragment,
    /// case-insensitively.
    fn search(&self, label_fragment: &str) -> Vec<WebhookLogEntry>;
}
