//! Template renderer built on Handlebars.

use handlebars::Handlebars;
use serde_json::Value;

use super::{EscapeHelper, TemplateError};

/// Renders body templates against a variable context.
///
/// Templates use Handlebars syntax: variable interpolation with
/// `{{record.name}}`, attribute access through dotted paths, and comments
/// with `{{!-- ... --}}`. HTML escaping is disabled since rendered output
/// is a request payload, not markup. Missing variables render as empty
/// text rather than erroring.
///
/// # Example
///
/// ```
/// use outhook::template::TemplateRenderer;
/// use serde_json::json;
///
/// let renderer = TemplateRenderer::new();
/// let data = json!({"record": {"name": "Ann"}});
/// let rendered = renderer
///     .render(r#"{"name": "{{record.name}}"}"#, &data)
///     .unwrap();
///
/// assert_eq!(rendered, r#"{"name": "Ann"}"#);
/// ```
#[derive(Debug)]
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer for generic request bodies and GET parameters.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// Creates a renderer with the `escape` helper registered.
    ///
    /// Used for GraphQL bodies, where record fields are embedded inside a
    /// quoted query string: `{{escape record "name"}}`.
    #[must_use]
    pub fn for_graphql() -> Self {
        let mut renderer = Self::new();
        renderer
            .registry
            .register_helper("escape", Box::new(EscapeHelper));
        renderer
    }

    /// Renders the template against the given data.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template syntax is malformed or
    /// a helper fails.
    pub fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        self.registry
            .render_template(template, data)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
