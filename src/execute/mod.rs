//! Webhook execution pipeline and outcome handling.
//!
//! This module provides:
//! - The per-batch / per-record entry points ([`WebhookExecutor`])
//! - The attempt-level error taxonomy ([`WebhookError`], [`FailureKind`])
//! - Terminal attempt states ([`AttemptOutcome`])
//! - The opaque delayed-execution capability ([`DelayScheduler`],
//!   [`NoopScheduler`])

mod error;
mod executor;
mod scheduler;

#[cfg(test)]
mod executor_tests;

pub use error::{FailureKind, WebhookError};
pub use executor::{AttemptOutcome, WebhookExecutor};
pub use scheduler::{DelayScheduler, NoopScheduler};
