//! Record and render-context types.
//!
//! A [`Record`] is the entity a webhook fires for: an ordered map of field
//! names to JSON values supplied by the upstream event system. A
//! [`RenderContext`] carries the variables available to the body template,
//! always including `record` and `records`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The entity a webhook attempt is executed for.
///
/// Fields are arbitrary JSON values keyed by name; the upstream caller
/// decides what the record exposes to templates (commonly `id`, `name`
/// and a handful of domain fields).
///
/// # Example
///
/// ```
/// use outhook::record::Record;
///
/// let record = Record::new()
///     .with_field("id", 1)
///     .with_field("name", "Ann");
///
/// assert_eq!(record.field("name").and_then(|v| v.as_str()), Some("Ann"));
/// assert!(record.field("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Adds a field, replacing any existing value under the same name.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the named field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the record as a JSON object value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Variables available to the body template during one attempt.
///
/// The upstream trigger supplies this alongside the records. When an
/// attempt runs after a scheduling delay the context is not preserved;
/// [`RenderContext::for_record`] derives a fresh one containing only
/// `record` and `records`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    vars: Map<String, Value>,
}

impl RenderContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self { vars: Map::new() }
    }

    /// Derives a fresh context for a single record.
    ///
    /// Sets `record` to the record itself and `records` to a one-element
    /// collection containing it.
    #[must_use]
    pub fn for_record(record: &Record) -> Self {
        let mut vars = Map::new();
        vars.insert("record".to_owned(), record.to_value());
        vars.insert("records".to_owned(), Value::Array(vec![record.to_value()]));
        Self { vars }
    }

    /// Adds a variable, replacing any existing value under the same name.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Returns the named variable, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Produces the template data for one record.
    ///
    /// The context variables are kept as-is except `record`, which is
    /// overridden by the record currently being processed.
    #[must_use]
    pub fn data_for(&self, record: &Record) -> Value {
        let mut vars = self.vars.clone();
        vars.insert("record".to_owned(), record.to_value());
        Value::Object(vars)
    }
}
