//! Delayed-execution capability.

use std::time::Duration;

use crate::config::WebhookConfig;
use crate::record::Record;

/// Trait for the external "schedule later" capability.
///
/// When a configuration selects delayed execution, the executor hands the
/// record and delay to the scheduler instead of dispatching. The
/// scheduler is responsible for eventually calling
/// [`WebhookExecutor::execute_one`](crate::execute::WebhookExecutor::execute_one)
/// with `ctx = None`; the render context is not preserved across the
/// delay boundary. The delay applies before the first attempt only, never
/// after a failure.
pub trait DelayScheduler: Send + Sync {
    /// Hands one record off for delayed execution.
    fn schedule(&self, config: WebhookConfig, record: Record, delay: Duration);
}

/// Scheduler used when no delayed-execution backend is wired up.
///
/// Drops the record with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl DelayScheduler for NoopScheduler {
    fn schedule(&self, config: WebhookConfig, _record: Record, delay: Duration) {
        tracing::warn!(
            webhook = %config.label,
            delay_secs = delay.as_secs(),
            "delayed execution requested but no scheduler is configured; dropping record"
        );
    }
}
