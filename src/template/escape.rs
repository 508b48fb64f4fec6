//! Field-escaping helper for structured query payloads.
//!
//! GraphQL queries embed record field values inside a quoted string, so
//! quotes and control characters in the value would break the query text.
//! The `escape` helper reads a field off the record and substitutes each
//! offending character with its two-character escape sequence.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason,
};
use serde_json::Value;

/// Characters substituted by [`escape_text`], paired with their
/// two-character replacements. Applied sequentially in this fixed order.
/// The backslash itself is intentionally not escaped.
const ESCAPES: [(char, &str); 6] = [
    ('"', "\\\""),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\t', "\\t"),
    ('\u{0008}', "\\b"),
    ('\u{000C}', "\\f"),
];

/// Escapes quotes and control characters for embedding in a quoted string.
///
/// Each character class is substituted independently; replacement targets
/// are single literal characters, so no re-scanning of already-substituted
/// text occurs. The operation is deterministic but not idempotent.
///
/// # Example
///
/// ```
/// use outhook::template::escape_text;
///
/// assert_eq!(escape_text("He said \"hi\"\n"), "He said \\\"hi\\\"\\n");
/// ```
#[must_use]
pub fn escape_text(input: &str) -> String {
    let mut escaped = input.to_owned();
    for (ch, replacement) in ESCAPES {
        escaped = escaped.replace(ch, replacement);
    }
    escaped
}

/// Handlebars helper exposed as `escape` when rendering GraphQL bodies.
///
/// Usage: `{{escape record "field"}}`. Reads the named field off the
/// record object; a missing field renders empty. Non-empty string values
/// are trimmed and escaped via [`escape_text`]; other values render
/// unchanged.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EscapeHelper;

impl HelperDef for EscapeHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let record = h
            .param(0)
            .map(|p| p.value())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("escape", 0))?;
        let field = h
            .param(1)
            .and_then(|p| p.value().as_str())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("escape", 1))?;

        match record.get(field) {
            Some(Value::String(s)) if !s.is_empty() => out.write(&escape_text(s.trim()))?,
            Some(Value::String(_) | Value::Null) | None => {}
            Some(other) => out.write(&other.to_string())?,
        }

        Ok(())
    }
}
