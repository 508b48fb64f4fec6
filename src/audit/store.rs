//! In-memory audit log store.

use std::sync::{Mutex, PoisonError};

use super::{AuditError, LogStore, WebhookLogEntry};

/// In-process, mutex-guarded audit log store.
///
/// Suitable for tests and for embedders that flush entries elsewhere.
/// Appends from concurrent attempts are serialized by the mutex; a
/// poisoned lock is recovered rather than propagated so the store keeps
/// accepting entries after a panicking thread.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    entries: Mutex<Vec<WebhookLogEntry>>,
}

impl MemoryLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no entries have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all entries, in append order.
    #[must_use]
    pub fn entries(&self) -> Vec<WebhookLogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogStore for MemoryLogStore {
    fn create(&self, entry: WebhookLogEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }

    fn search(&self, label_fragment: &str) -> Vec<WebhookLogEntry> {
        let fragment = label_fragment.to_lowercase();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.webhook.to_lowercase().contains(&fragment))
            .cloned()
            .collect()
    }
}

impl<S: LogStore> LogStore for std::sync::Arc<S> {
    fn create(&self, entry: WebhookLogEntry) -> Result<(), AuditError> {
        (**self).create(entry)
    }

    fn search(&self, label_fragment: &str) -> Vec<WebhookLogEntry> {
        (**self).search(label_fragment)
    }
}
