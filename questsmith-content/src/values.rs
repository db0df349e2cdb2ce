//! Lenient readers for form values.
//!
//! Form inputs arrive as whatever the UI produced: numbers, numeric strings,
//! booleans or nothing at all. Only enabled fields are read.

use questsmith_form::EditSession;
use serde_json::Value;

pub(crate) fn int(session: &EditSession, field: &str) -> Option<i64> {
    match session.enabled_value(field)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Drops the fraction; `None` if the result does not fit an `i64`.
fn truncate(f: f64) -> Option<i64> {
    // -2^63 and 2^63 are exact in f64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

/// Like [`int`], but a zero counts as unset.
pub(crate) fn nonzero_int(session: &EditSession, field: &str) -> Option<i64> {
    int(session, field).filter(|&v| v != 0)
}

pub(crate) fn text(session: &EditSession, field: &str) -> String {
    match session.enabled_value(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn truthy(session: &EditSession, field: &str) -> bool {
    session.enabled_value(field).is_some_and(is_checked)
}

/// How a checkbox value reads: `true`, `"true"` or any non-zero number.
pub(crate) fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
