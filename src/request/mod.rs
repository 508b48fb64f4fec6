//! Request construction for webhook attempts.
//!
//! Turns a [`WebhookConfig`](crate::config::WebhookConfig) plus the
//! triggering record and context into a concrete [`HttpRequest`]
//! (method, endpoint, headers, body or query parameters), rendering the
//! body template along the way.

mod builder;
mod error;


pub use builder::{BuiltRequest, DEFAULT_GET_TIMEOUT, DEFAULT_POST_TIMEOUT, build};
pub use error::BuildError;
