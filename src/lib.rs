//! Outhook: outgoing webhook execution.
//!
//! A library for dispatching outgoing webhook requests triggered by domain
//! events: rendering a user-defined template into a request body or query
//! parameters, sending it over HTTP, classifying the response (including
//! status codes embedded inside a GraphQL response body), and recording the
//! outcome in an append-only audit log.

pub mod audit;
pub mod classify;
pub mod config;
pub mod execute;
pub mod record;
pub mod request;
pub mod template;
pub mod transport;
