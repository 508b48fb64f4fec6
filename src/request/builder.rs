//! Builds the concrete HTTP request for one webhook attempt.

use std::time::Duration;

use serde_json::json;

use crate::config::{RequestMethod, RequestType, WebhookConfig, parse_header_map};
use crate::record::{Record, RenderContext};
use crate::template::TemplateRenderer;
use crate::transport::HttpRequest;

use super::BuildError;

/// Fixed timeout for GET requests.
pub const DEFAULT_GET_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed timeout for POST requests.
pub const DEFAULT_POST_TIMEOUT: Duration = Duration::from_secs(5);

/// A built request together with the rendered payload text.
///
/// The payload is the rendered query parameters (GET) or body (POST) and
/// is kept as a string for the audit log entry.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    /// The request to dispatch.
    pub request: HttpRequest,
    /// Rendered payload, for logging.
    pub payload: String,
}

/// Builds the HTTP request for one attempt.
///
/// GET renders the body template into the query-parameter payload. POST
/// selects body construction by request type: GraphQL wraps the rendered
/// query in a `{"query": ..., "variables": {}}` envelope; Slack and
/// unrecognized types fall back to the generic raw-body construction.
/// Headers come from the stored header string, parsed strictly as a JSON
/// object.
///
/// # Errors
///
/// Returns [`BuildError`] when the endpoint is not a valid URL, the
/// stored headers are not a valid JSON object, or the template fails to
/// render.
pub fn build(
    config: &WebhookConfig,
    record: &Record,
    ctx: &RenderContext,
) -> Result<BuiltRequest, BuildError> {
    let url = url::Url::parse(&config.endpoint).map_err(|source| BuildError::Endpoint {
        url: config.endpoint.clone(),
        source,
    })?;
    let headers = parse_header_map(&config.headers)?;
    let data = ctx.data_for(record);

    match config.request_method {
        RequestMethod::Get => {
            let params = TemplateRenderer::new().render(&config.body_template, &data)?;
            let request = HttpRequest::get(url)
                .with_headers(headers)
                .with_query(params.clone())
                .with_timeout(DEFAULT_GET_TIMEOUT);

            Ok(BuiltRequest {
                request,
                payload: params,
            })
        }
        RequestMethod::Post => {
            let body = match config.request_type {
                RequestType::Graphql => {
                    let query =
                        TemplateRenderer::for_graphql().render(&config.body_template, &data)?;
                    json!({"query": query, "variables": {}}).to_string()
                }
                // Slack and unrecognized types degrade to the generic
                // raw-body construction.
                RequestType::Request | RequestType::Slack | RequestType::Other => {
                    TemplateRenderer::new().render(&config.body_template, &data)?
                }
            };
            let request = HttpRequest::post(url)
                .with_headers(headers)
                .with_body(body.clone().into_bytes())
                .with_timeout(DEFAULT_POST_TIMEOUT);

            Ok(BuiltRequest {
                request,
                payload: body,
            })
        }
    }
}
