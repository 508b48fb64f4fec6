//! HTTP transport for webhook dispatch.
//!
//! This module provides:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Transport-level error type ([`TransportError`])

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::TransportError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
