//! HTTP request/response types and client trait.

use std::time::Duration;

use super::TransportError;

/// An HTTP request to be sent.
///
/// This is a value type built by the request builder and handed to any
/// [`HttpClient`] implementation. It uses standard `http` crate types for
/// method and headers. The optional `query` is the rendered parameter
/// payload for GET-style webhooks and is attached to the URL verbatim; the
/// optional `timeout` bounds the whole call and is the sole cancellation
/// mechanism.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET or POST for webhooks).
    pub method: http::Method,
    /// Target URL.
    pub url: url::Url,
    /// HTTP headers to send.
    pub headers: http::HeaderMap,
    /// Optional request body.
    pub body: Option<Vec<u8>>,
    /// Optional raw query-parameter payload.
    pub query: Option<String>,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new HTTP request with the given method and URL.
    ///
    /// Headers are initialized to an empty map; body, query and timeout
    /// are unset.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
            query: None,
            timeout: None,
        }
    }

    /// Creates a GET request to the given URL.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the raw query-parameter payload.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the header map.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a header to the request.
    ///
    /// If the header name already exists, the value is appended
    /// (HTTP headers can have multiple values).
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// An HTTP response received from a server.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: http::StatusCode,
    /// Response headers.
    pub headers: http::HeaderMap,
    /// Response body (fully buffered).
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates an HTTP-level error
    /// (4xx or 5xx).
    #[must_use]
    pub fn is_error_status(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns the body as a UTF-8 string, replacing invalid sequences.
    #[must_use]
    pub fn body_text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// Abstracts the HTTP client implementation so tests can inject mock
/// clients and callers can swap HTTP libraries without changing the
/// execution pipeline. Exactly one request per call; no retries, no
/// redirect-policy customization beyond library defaults.
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when:
    /// - Network connection or DNS resolution fails
    ///   ([`TransportError::Connection`])
    /// - The request times out ([`TransportError::Timeout`])
    /// - The request cannot be built ([`TransportError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}
