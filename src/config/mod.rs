//! Webhook configuration.
//!
//! A [`WebhookConfig`] is created and edited by an operator through an
//! external store and is read-only during execution. It selects the
//! transport style (method + request type), carries the body template and
//! the stored header string, and toggles audit logging and delayed
//! execution.

mod error;
mod headers;


pub use error::HeaderParseError;
pub use headers::parse_header_map;

use serde::{Deserialize, Serialize};

/// Body template used when a webhook is created without one.
///
/// Exposes the triggering record's `id` and `name`.
pub const DEFAULT_BODY_TEMPLATE: &str = r#"{{!-- Available variables:
  - record: record on which the action is triggered; may be void
--}}
{
    "id": {{record.id}},
    "name": "{{record.name}}"
}
"#;

/// HTTP method used for the webhook request.
///
/// GET renders the template into query parameters; POST renders it into a
/// request body whose construction is selected by [`RequestType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    /// Rendered template is sent as the query-parameter payload.
    Get,
    /// Rendered template is sent as the request body.
    #[default]
    Post,
}

/// Request style, affecting POST body construction and status
/// classification.
///
/// Unrecognized values deserialize to [`RequestType::Other`] and fall back
/// to the generic body construction rather than erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Plain HTTP request; the rendered template is the raw body.
    #[default]
    Request,
    /// GraphQL request; the rendered query is wrapped in a JSON envelope
    /// and the response body may carry the effective status code.
    Graphql,
    /// Slack-style request; uses the generic body construction.
    Slack,
    /// Any request type this crate does not know about.
    #[serde(other)]
    Other,
}

/// Configuration for one outgoing webhook, immutable per attempt.
///
/// # Example
///
/// ```
/// use outhook::config::{RequestMethod, RequestType, WebhookConfig};
///
/// let config = WebhookConfig::new("partner sync", "https://api.example.com/hook")
///     .with_request_method(RequestMethod::Post)
///     .with_request_type(RequestType::Request)
///     .with_body_template(r#"{"name": "{{record.name}}"}"#)
///     .with_logging(true);
///
/// assert_eq!(config.endpoint, "https://api.example.com/hook");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Human identifier recorded in audit entries and searched by
    /// substring for troubleshooting.
    pub label: String,
    /// Target URL.
    pub endpoint: String,
    /// Headers as a serialized JSON object string.
    ///
    /// Parsed strictly by [`parse_header_map`]; never evaluated as code.
    pub headers: String,
    /// Body template rendered against the attempt's context.
    pub body_template: String,
    /// HTTP method.
    pub request_method: RequestMethod,
    /// Request style for POST body construction and classification.
    pub request_type: RequestType,
    /// Whether successful calls create an audit entry. Failed calls always
    /// do.
    pub log_webhook_calls: bool,
    /// Whether execution is handed to the external scheduler instead of
    /// running immediately.
    pub delay_execution: bool,
    /// Delay before the first attempt, in seconds.
    pub delay: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            endpoint: String::new(),
            headers: "{}".to_owned(),
            body_template: DEFAULT_BODY_TEMPLATE.to_owned(),
            request_method: RequestMethod::default(),
            request_type: RequestType::default(),
            log_webhook_calls: false,
            delay_execution: false,
            delay: 0,
        }
    }
}

impl WebhookConfig {
    /// Creates a configuration with defaults for everything but the label
    /// and endpoint.
    #[must_use]
    pub fn new(label: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the stored header string (a JSON object literal).
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Sets the body template.
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = template.into();
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_request_method(mut self, method: RequestMethod) -> Self {
        self.request_method = method;
        self
    }

    /// Sets the request type.
    #[must_use]
    pub const fn with_request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = request_type;
        self
    }

    /// Enables or disables audit logging of successful calls.
    #[must_use]
    pub const fn with_logging(mut self, log_webhook_calls: bool) -> Self {
        self.log_webhook_calls = log_webhook_calls;
        self
    }

    /// Enables delayed execution with the given delay in seconds.
    #[must_use]
    pub const fn with_delay(mut self, delay_secs: u64) -> Self {
        self.delay_execution = true;
        self.delay = delay_secs;
        self
    }
}
