//! Tests for the webhook executor and its outcome handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use super::executor::{AttemptOutcome, WebhookExecutor};
use super::{DelayScheduler, FailureKind, WebhookError};
use crate::audit::{LogStore, MemoryLogStore};
use crate::config::{RequestMethod, RequestType, WebhookConfig};
use crate::record::{Record, RenderContext};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn responding(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))])
    }

    fn ok() -> Self {
        Self::responding(http::StatusCode::OK, "ok")
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).request(req).await
    }
}

/// Scheduler that records every hand-off.
#[derive(Debug, Default)]
struct RecordingScheduler {
    scheduled: Mutex<Vec<(WebhookConfig, Record, Duration)>>,
}

impl DelayScheduler for RecordingScheduler {
    fn schedule(&self, config: WebhookConfig, record: Record, delay: Duration) {
        self.scheduled.lock().unwrap().push((config, record, delay));
    }
}

impl DelayScheduler for Arc<RecordingScheduler> {
    fn schedule(&self, config: WebhookConfig, record: Record, delay: Duration) {
        (**self).schedule(config, record, delay);
    }
}

fn config() -> WebhookConfig {
    WebhookConfig::new("partner sync hook", "https://api.example.com/hook")
}

fn record() -> Record {
    Record::new().with_field("id", 1).with_field("name", "Ann")
}

fn failure_kind(outcome: &AttemptOutcome) -> Option<FailureKind> {
    match outcome {
        AttemptOutcome::Succeeded { .. } => None,
        AttemptOutcome::Failed { error } => Some(error.kind()),
    }
}

mod success_path {
    use super::*;

    #[tokio::test]
    async fn logs_exactly_one_entry_when_logging_enabled() {
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new());
        let config = config().with_logging(true);
        let record = record();

        let outcome = executor.execute_one(&config, &record, None).await;

        assert!(outcome.is_success());
        let entries = executor.log_store().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].webhook, "partner sync hook");
        assert_eq!(entries[0].endpoint, "https://api.example.com/hook");
        assert_eq!(entries[0].headers, "{}");
        assert_eq!(entries[0].response, "ok");
        assert_eq!(entries[0].status, Some(200));
    }

    #[tokio::test]
    async fn logs_nothing_when_logging_disabled() {
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new());
        let config = config().with_logging(false);

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert!(outcome.is_success());
        assert!(executor.log_store().is_empty());
    }

    #[tokio::test]
    async fn end_to_end_post_logs_rendered_body() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config()
            .with_request_method(RequestMethod::Post)
            .with_request_type(RequestType::Request)
            .with_body_template(r#"{"name": "{{record.name}}", "email": "{{record.email}}"}"#)
            .with_logging(true);
        let record = Record::new()
            .with_field("name", "Test Partner 1")
            .with_field("email", "test.partner1@test.example.com");
        let ctx = RenderContext::for_record(&record);

        executor.run_for_records(&config, &[record], &ctx).await;

        let entries = executor.log_store().search("partner sync");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].body,
            r#"{"name": "Test Partner 1", "email": "test.partner1@test.example.com"}"#
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn graphql_with_embedded_200_succeeds() {
        let client = MockClient::responding(
            http::StatusCode::OK,
            r#"{"data": {"createPartner": {"statusCode": 200}}}"#,
        );
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());
        let config = config()
            .with_request_type(RequestType::Graphql)
            .with_body_template("query { {{record.id}} }")
            .with_logging(true);

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert!(outcome.is_success());
        let entries = executor.log_store().entries();
        assert_eq!(entries[0].status, Some(200));
    }

    #[tokio::test]
    async fn derives_fresh_context_when_none_given() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config()
            .with_body_template(r#"{"name": "{{record.name}}"}"#)
            .with_logging(true);

        executor.execute_one(&config, &record(), None).await;

        let entries = executor.log_store().entries();
        assert_eq!(entries[0].body, r#"{"name": "Ann"}"#);
    }
}

mod failure_path {
    use super::*;

    #[tokio::test]
    async fn server_error_fails_and_always_logs() {
        let client = MockClient::responding(http::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());
        // Logging disabled: failure evidence is retained anyway.
        let config = config().with_logging(false);

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::HttpStatus));
        let entries = executor.log_store().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, Some(500));
        assert!(entries[0].response.contains("500"));
    }

    #[tokio::test]
    async fn embedded_error_status_fails_despite_http_200() {
        let client = MockClient::responding(
            http::StatusCode::OK,
            r#"{"data": {"x": {"statusCode": 404}}}"#,
        );
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());
        let config = config()
            .with_request_type(RequestType::Graphql)
            .with_body_template("query { {{record.id}} }");

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::HttpStatus));
        match outcome {
            AttemptOutcome::Failed {
                error: WebhookError::ClassifiedStatus { classified, http_status, .. },
            } => {
                assert_eq!(classified, 404);
                assert_eq!(http_status, http::StatusCode::OK);
            }
            other => panic!("expected classified-status failure, got {other:?}"),
        }
        // The entry records the raw HTTP status, not the classified one.
        let entries = executor.log_store().entries();
        assert_eq!(entries[0].status, Some(200));
    }

    #[tokio::test]
    async fn non_numeric_embedded_status_fails_the_attempt() {
        let client = MockClient::responding(
            http::StatusCode::OK,
            r#"{"data": {"x": {"statusCode": "500"}}}"#,
        );
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());
        let config = config()
            .with_request_type(RequestType::Graphql)
            .with_body_template("query { {{record.id}} }");

        let outcome = executor.execute_one(&config, &record(), None).await;

        // An error signal from the endpoint is never treated as success,
        // even when its statusCode is not a number.
        assert_eq!(failure_kind(&outcome), Some(FailureKind::HttpStatus));
        assert_eq!(executor.log_store().entries()[0].status, Some(200));
    }

    #[tokio::test]
    async fn non_200_success_status_fails_classification() {
        let client = MockClient::responding(http::StatusCode::NO_CONTENT, "");
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());

        let outcome = executor.execute_one(&config(), &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::HttpStatus));
        assert_eq!(executor.log_store().entries()[0].status, Some(204));
    }

    #[tokio::test]
    async fn timeout_fails_with_timeout_kind_and_empty_status() {
        let client = MockClient::new(vec![Err(TransportError::Timeout)]);
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());

        let outcome = executor.execute_one(&config(), &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::Timeout));
        let entries = executor.log_store().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, None);
        // The rendered payload still makes it into the entry.
        assert!(!entries[0].body.is_empty());
    }

    #[tokio::test]
    async fn connection_error_fails_with_connection_kind() {
        let client = MockClient::new(vec![Err(TransportError::Connection(
            "dns failure".into(),
        ))]);
        let executor = WebhookExecutor::new(client, MemoryLogStore::new());

        let outcome = executor.execute_one(&config(), &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::Connection));
    }

    #[tokio::test]
    async fn template_failure_is_internal_and_skips_the_call() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config().with_body_template("{{record.name");

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::Internal));
        assert_eq!(client.calls(), 0);
        let entries = executor.log_store().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "");
        assert_eq!(entries[0].status, None);
    }

    #[tokio::test]
    async fn header_failure_is_internal() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config().with_headers("not an object");

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::Internal));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_endpoint_is_other_request_kind() {
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new());
        let config = WebhookConfig::new("bad endpoint", "no scheme");

        let outcome = executor.execute_one(&config, &record(), None).await;

        assert_eq!(failure_kind(&outcome), Some(FailureKind::OtherRequest));
    }
}

mod batch_runs {
    use super::*;

    #[tokio::test]
    async fn one_failed_record_does_not_abort_the_rest() {
        let client = Arc::new(MockClient::new(vec![
            Ok(HttpResponse::new(
                http::StatusCode::INTERNAL_SERVER_ERROR,
                http::HeaderMap::new(),
                b"boom".to_vec(),
            )),
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                b"ok".to_vec(),
            )),
        ]));
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config().with_logging(true);
        let records = vec![
            Record::new().with_field("id", 1).with_field("name", "first"),
            Record::new().with_field("id", 2).with_field("name", "second"),
        ];
        let ctx = RenderContext::for_record(&records[0]);

        executor.run_for_records(&config, &records, &ctx).await;

        assert_eq!(client.calls(), 2);
        // One failure entry plus one success entry.
        assert_eq!(executor.log_store().len(), 2);
    }

    #[tokio::test]
    async fn returns_the_follow_up_action_from_the_context() {
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new());
        let record = record();
        let ctx = RenderContext::for_record(&record).with_var("action", json!({"next": "step"}));

        let action = executor
            .run_for_records(&config(), &[record], &ctx)
            .await;

        assert_eq!(action, Some(json!({"next": "step"})));
    }

    #[tokio::test]
    async fn returns_none_without_a_follow_up_action() {
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new());
        let record = record();
        let ctx = RenderContext::for_record(&record);

        let action = executor
            .run_for_records(&config(), &[record], &ctx)
            .await;

        assert!(action.is_none());
    }

    #[tokio::test]
    async fn each_record_renders_against_its_own_fields() {
        let client = Arc::new(MockClient::new(vec![
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                b"ok".to_vec(),
            )),
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                b"ok".to_vec(),
            )),
        ]));
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config()
            .with_body_template("{{record.name}}")
            .with_logging(true);
        let records = vec![
            Record::new().with_field("name", "first"),
            Record::new().with_field("name", "second"),
        ];
        let ctx = RenderContext::for_record(&records[0]);

        executor.run_for_records(&config, &records, &ctx).await;

        let entries = executor.log_store().entries();
        assert_eq!(entries[0].body, "first");
        assert_eq!(entries[1].body, "second");
    }
}

mod delayed_execution {
    use super::*;

    #[tokio::test]
    async fn hands_records_to_the_scheduler_without_dispatching() {
        let client = Arc::new(MockClient::ok());
        let scheduler = Arc::new(RecordingScheduler::default());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new())
            .with_scheduler(Arc::clone(&scheduler));
        let config = config().with_delay(30);
        let record = record();
        let ctx = RenderContext::for_record(&record);

        executor.run_for_records(&config, &[record], &ctx).await;

        assert_eq!(client.calls(), 0);
        assert!(executor.log_store().is_empty());
        let scheduled = scheduler.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].2, Duration::from_secs(30));
        assert_eq!(scheduled[0].0.label, "partner sync hook");
    }

    #[tokio::test]
    async fn direct_execution_ignores_the_scheduler() {
        let scheduler = Arc::new(RecordingScheduler::default());
        let executor = WebhookExecutor::new(MockClient::ok(), MemoryLogStore::new())
            .with_scheduler(Arc::clone(&scheduler));
        let record = record();
        let ctx = RenderContext::for_record(&record);

        executor.run_for_records(&config(), &[record], &ctx).await;

        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn get_requests_carry_rendered_query_and_no_body() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config()
            .with_request_method(RequestMethod::Get)
            .with_body_template(r#"{"name": "{{record.name}}"}"#);

        executor.execute_one(&config, &record(), None).await;

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(requests[0].query.as_deref(), Some(r#"{"name": "Ann"}"#));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn stored_headers_reach_the_wire_request() {
        let client = Arc::new(MockClient::ok());
        let executor = WebhookExecutor::new(Arc::clone(&client), MemoryLogStore::new());
        let config = config().with_headers(r#"{"X-Api-Key": "secret"}"#);

        executor.execute_one(&config, &record(), None).await;

        let requests = client.captured_requests();
        assert_eq!(requests[0].headers.get("x-api-key").unwrap(), "secret");
    }
}
