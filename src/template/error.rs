//! Error type for template rendering.

use thiserror::Error;

/// Error type for template operations.
///
/// Raised for malformed template syntax or a rendering failure. Missing
/// variables are not errors; they render as empty text.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be parsed or rendered.
    #[error("Failed to render template: {0}")]
    Render(String),
}
