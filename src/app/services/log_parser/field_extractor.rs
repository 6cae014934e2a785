//! Tolerant `key=value` field extraction
//!
//! Keys are ASCII word characters. Values are either a double-quoted string
//! (quotes stripped, no escape processing) or a maximal run of non-whitespace
//! characters. Text that does not match is ignored, and a repeated key keeps
//! its last value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::models::RawFields;

static KEY_VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+)=(?:"([^"]*)"|(\S+))"#)
        .expect("key=value pattern is a valid regex")
});

/// Extract all `key=value` pairs from a log line
///
/// Never fails: a line without any pairs yields an empty mapping.
pub fn extract_fields(line: &str) -> RawFields {
    let mut fields = RawFields::new();

    for captures in KEY_VALUE_PATTERN.captures_iter(line) {
        let key = &captures[1];
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();

        fields.insert(key.to_string(), value.to_string());
    }

    fields
}

/// Strip exactly one layer of surrounding double quotes, if present
pub fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
