//! Template rendering for webhook payloads.
//!
//! This module provides:
//! - Rendering templates against a variable context ([`TemplateRenderer`])
//! - A field-escaping helper for embedding record values inside structured
//!   query strings ([`escape_text`])
//! - Rendering error type ([`TemplateError`])

mod error;
mod escape;
mod renderer;


pub use error::TemplateError;
pub use escape::escape_text;
pub use renderer::TemplateRenderer;

pub(crate) use escape::EscapeHelper;
