//! Per-record webhook execution and outcome handling.

use std::time::Duration;

use serde_json::Value;

use crate::audit::{Direction, LogStore, WebhookLogEntry};
use crate::classify::classify;
use crate::config::WebhookConfig;
use crate::record::{Record, RenderContext};
use crate::request::{BuiltRequest, build};
use crate::transport::{HttpClient, HttpResponse};

use super::{DelayScheduler, FailureKind, NoopScheduler, WebhookError};

/// Terminal state of one webhook attempt.
///
/// An attempt moves Pending → Dispatched → Succeeded or Failed; only the
/// terminal state is observable. Failures never propagate as errors: one
/// record's failure must not abort the rest of a batch.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Response received, no HTTP error status, classified status 200.
    Succeeded {
        /// Raw HTTP status of the response.
        status: http::StatusCode,
    },
    /// Anything else.
    Failed {
        /// The failure, already diagnosed and logged.
        error: WebhookError,
    },
}

impl AttemptOutcome {
    /// Returns true for the succeeded state.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Result of the dispatch phase, before outcome handling.
struct Dispatched {
    payload: String,
    response: HttpResponse,
}

/// A failed dispatch with whatever material was produced before it.
struct Failure {
    error: WebhookError,
    payload: Option<String>,
    http_status: Option<http::StatusCode>,
}

impl Failure {
    fn early(error: impl Into<WebhookError>) -> Self {
        Self {
            error: error.into(),
            payload: None,
            http_status: None,
        }
    }
}

/// Executes webhook attempts: builds the request, dispatches it,
/// classifies the response and records the outcome.
///
/// # Type Parameters
///
/// - `C`: the HTTP client implementation
/// - `L`: the audit log store
/// - `D`: the delayed-execution scheduler (defaults to [`NoopScheduler`])
///
/// # Example
///
/// ```no_run
/// use outhook::audit::MemoryLogStore;
/// use outhook::config::WebhookConfig;
/// use outhook::execute::WebhookExecutor;
/// use outhook::record::{Record, RenderContext};
/// use outhook::transport::ReqwestClient;
///
/// # async fn example() {
/// let executor = WebhookExecutor::new(ReqwestClient::new(), MemoryLogStore::new());
/// let config = WebhookConfig::new("partner sync", "https://api.example.com/hook")
///     .with_logging(true);
/// let record = Record::new().with_field("id", 1).with_field("name", "Ann");
/// let ctx = RenderContext::for_record(&record);
///
/// executor.run_for_records(&config, &[record], &ctx).await;
/// # }
/// ```
#[derive(Debug)]
pub struct WebhookExecutor<C, L, D = NoopScheduler> {
    client: C,
    log_store: L,
    scheduler: D,
}

impl<C, L> WebhookExecutor<C, L, NoopScheduler> {
    /// Creates an executor without a delayed-execution backend.
    #[must_use]
    pub const fn new(client: C, log_store: L) -> Self {
        Self {
            client,
            log_store,
            scheduler: NoopScheduler,
        }
    }
}

impl<C, L, D> WebhookExecutor<C, L, D> {
    /// Sets the delayed-execution scheduler.
    #[must_use]
    pub fn with_scheduler<D2>(self, scheduler: D2) -> WebhookExecutor<C, L, D2> {
        WebhookExecutor {
            client: self.client,
            log_store: self.log_store,
            scheduler,
        }
    }

    /// Returns the audit log store.
    #[must_use]
    pub const fn log_store(&self) -> &L {
        &self.log_store
    }
}

impl<C: HttpClient, L: LogStore, D: DelayScheduler> WebhookExecutor<C, L, D> {
    /// Runs the webhook for each triggered record, sequentially and
    /// non-batched.
    ///
    /// Records selected for delayed execution are handed to the scheduler
    /// with the configured delay; the context is not carried across the
    /// delay boundary. A failed record never aborts processing of
    /// subsequent records. Returns the context's follow-up `action`
    /// value, if any, for the upstream caller.
    pub async fn run_for_records(
        &self,
        config: &WebhookConfig,
        records: &[Record],
        ctx: &RenderContext,
    ) -> Option<Value> {
        for record in records {
            if config.delay_execution {
                self.scheduler.schedule(
                    config.clone(),
                    record.clone(),
                    Duration::from_secs(config.delay),
                );
            } else {
                self.execute_one(config, record, Some(ctx)).await;
            }
        }

        ctx.get("action").cloned()
    }

    /// Executes one webhook attempt for one record.
    ///
    /// When `ctx` is `None` (re-invocation after a scheduling delay), a
    /// fresh context is derived from the record. The attempt succeeds
    /// only when a response is received, its HTTP status is not 4xx/5xx,
    /// and the classified status is exactly 200.
    ///
    /// On success an audit entry is created if the configuration enables
    /// logging, recording the raw HTTP status. On failure the cause is
    /// diagnosed by category and an audit entry is always created,
    /// regardless of the logging flag.
    pub async fn execute_one(
        &self,
        config: &WebhookConfig,
        record: &Record,
        ctx: Option<&RenderContext>,
    ) -> AttemptOutcome {
        let derived;
        let ctx = match ctx {
            Some(ctx) => ctx,
            None => {
                derived = RenderContext::for_record(record);
                &derived
            }
        };

        match self.dispatch(config, record, ctx).await {
            Ok(dispatched) => {
                tracing::debug!(
                    webhook = %config.label,
                    endpoint = %config.endpoint,
                    status = dispatched.response.status.as_u16(),
                    "webhook delivered"
                );
                if config.log_webhook_calls {
                    self.record_entry(
                        config,
                        &dispatched.payload,
                        dispatched.response.body_text_lossy(),
                        Some(dispatched.response.status.as_u16()),
                    );
                }
                AttemptOutcome::Succeeded {
                    status: dispatched.response.status,
                }
            }
            Err(failure) => {
                self.diagnose(config, &failure.error);
                // Failure evidence is always retained, whatever the
                // logging flag says.
                self.record_entry(
                    config,
                    failure.payload.as_deref().unwrap_or(""),
                    failure.error.to_string(),
                    failure.http_status.map(|s| s.as_u16()),
                );
                AttemptOutcome::Failed {
                    error: failure.error,
                }
            }
        }
    }

    /// Builds, sends and classifies one request.
    async fn dispatch(
        &self,
        config: &WebhookConfig,
        record: &Record,
        ctx: &RenderContext,
    ) -> Result<Dispatched, Failure> {
        let BuiltRequest { request, payload } =
            build(config, record, ctx).map_err(Failure::early)?;

        let response = match self.client.request(request).await {
            Ok(response) => response,
            Err(error) => {
                return Err(Failure {
                    error: error.into(),
                    payload: Some(payload),
                    http_status: None,
                });
            }
        };

        if response.is_error_status() {
            return Err(Failure {
                error: WebhookError::HttpStatus {
                    status: response.status,
                    body: response.body_text_lossy(),
                },
                payload: Some(payload),
                http_status: Some(response.status),
            });
        }

        let classified = classify(&response, config.request_type);
        if classified != 200 {
            return Err(Failure {
                error: WebhookError::ClassifiedStatus {
                    classified,
                    http_status: response.status,
                    body: response.body_text_lossy(),
                },
                payload: Some(payload),
                http_status: Some(response.status),
            });
        }

        Ok(Dispatched { payload, response })
    }

    /// Emits the diagnostic event identifying the failure category.
    fn diagnose(&self, config: &WebhookConfig, error: &WebhookError) {
        let endpoint = config.endpoint.as_str();
        match error.kind() {
            FailureKind::HttpStatus => {
                tracing::error!(webhook = %config.label, endpoint, error = %error, "HTTP error status during webhook request");
            }
            FailureKind::Connection => {
                tracing::error!(webhook = %config.label, endpoint, error = %error, "connection error during webhook request");
            }
            FailureKind::Timeout => {
                tracing::error!(webhook = %config.label, endpoint, error = %error, "webhook request timed out");
            }
            FailureKind::OtherRequest => {
                tracing::error!(webhook = %config.label, endpoint, error = %error, "request error during webhook request");
            }
            FailureKind::Internal => {
                tracing::error!(webhook = %config.label, endpoint, error = %error, "internal error while sending webhook request");
            }
        }
    }

    /// Creates one audit entry; a store failure is diagnosed and
    /// swallowed.
    fn record_entry(
        &self,
        config: &WebhookConfig,
        body: &str,
        response: String,
        status: Option<u16>,
    ) {
        let entry = WebhookLogEntry {
            direction: Direction::Outgoing,
            webhook: config.label.clone(),
            endpoint: config.endpoint.clone(),
            headers: config.headers.clone(),
            body: body.to_owned(),
            response,
            status,
        };

        if let Err(error) = self.log_store.create(entry) {
            tracing::error!(
                webhook = %config.label,
                error = %error,
                "internal error: failed to persist webhook audit entry"
            );
        }
    }
}
