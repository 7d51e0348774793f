//! Field-level check primitives used by the step validators.
//!
//! Each check inspects one field of a JSON payload object, records a
//! [`FieldViolation`] for every rule it breaks, and returns the normalized
//! value when the field is acceptable. Checks never short-circuit, so a
//! validator run reports all problems at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateUrl};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

fn violation(field: &str, rule: &str, message: impl Into<String>) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        rule: rule.to_string(),
        message: message.into(),
    }
}

/// Extract a field as a trimmed string, or record a `type_check` violation.
///
/// Returns `None` for absent or `null` fields without recording anything;
/// presence requirements are the caller's concern.
fn trimmed_string(
    obj: &Map<String, Value>,
    field: &str,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            out.push(violation(field, "type_check", format!("{field} must be a string")));
            None
        }
    }
}

/// Required non-empty string of at most `max_len` characters.
pub(crate) fn require_string(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let before = out.len();
    match trimmed_string(obj, field, out) {
        Some(s) if !s.is_empty() => {
            if s.chars().count() > max_len {
                out.push(violation(
                    field,
                    "max_length",
                    format!("{field} must be at most {max_len} characters"),
                ));
                return None;
            }
            Some(s)
        }
        Some(_) | None => {
            // Only report "required" if the field wasn't already rejected
            // for being the wrong type.
            if out.len() == before {
                out.push(violation(field, "required", format!("{field} is required")));
            }
            None
        }
    }
}

/// Required string with both a minimum and a maximum character count.
pub(crate) fn require_text(
    obj: &Map<String, Value>,
    field: &str,
    min_len: usize,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = require_string(obj, field, max_len, out)?;
    if s.chars().count() < min_len {
        out.push(violation(
            field,
            "min_length",
            format!("{field} must be at least {min_len} characters"),
        ));
        return None;
    }
    Some(s)
}

/// Optional string of at most `max_len` characters. Empty strings are
/// treated as absent.
pub(crate) fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = trimmed_string(obj, field, out)?;
    if s.is_empty() {
        return None;
    }
    if s.chars().count() > max_len {
        out.push(violation(
            field,
            "max_length",
            format!("{field} must be at most {max_len} characters"),
        ));
        return None;
    }
    Some(s)
}

/// Required, syntactically valid email address. Normalized to lowercase.
pub(crate) fn require_email(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = require_string(obj, field, max_len, out)?;
    let s = s.to_lowercase();
    if !s.validate_email() {
        out.push(violation(field, "email", format!("{field} must be a valid email address")));
        return None;
    }
    Some(s)
}

/// Required, syntactically valid URL.
pub(crate) fn require_url(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = require_string(obj, field, max_len, out)?;
    if !s.validate_url() {
        out.push(violation(field, "url", format!("{field} must be a valid URL")));
        return None;
    }
    Some(s)
}

/// Optional, syntactically valid URL. Empty strings are treated as absent.
pub(crate) fn optional_url(
    obj: &Map<String, Value>,
    field: &str,
    max_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<String> {
    let s = optional_string(obj, field, max_len, out)?;
    if !s.validate_url() {
        out.push(violation(field, "url", format!("{field} must be a valid URL")));
        return None;
    }
    Some(s)
}

/// Required integer within an inclusive range.
pub(crate) fn require_int_range(
    obj: &Map<String, Value>,
    field: &str,
    min: i64,
    max: i64,
    out: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => {
            out.push(violation(field, "required", format!("{field} is required")));
            return None;
        }
        Some(v) => v,
    };
    let Some(n) = value.as_i64() else {
        out.push(violation(field, "type_check", format!("{field} must be an integer")));
        return None;
    };
    if n < min {
        out.push(violation(field, "min_value", format!("{field} must be at least {min}")));
        return None;
    }
    if n > max {
        out.push(violation(field, "max_value", format!("{field} must be at most {max}")));
        return None;
    }
    Some(n)
}

/// Optional array of non-empty strings, bounded in count and item length.
/// Items are trimmed. An absent field yields `None`.
pub(crate) fn optional_string_list(
    obj: &Map<String, Value>,
    field: &str,
    max_items: usize,
    max_item_len: usize,
    out: &mut Vec<FieldViolation>,
) -> Option<Vec<String>> {
    let items = match obj.get(field) {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(_) => {
            out.push(violation(field, "type_check", format!("{field} must be an array of strings")));
            return None;
        }
    };
    if items.len() > max_items {
        out.push(violation(
            field,
            "max_items",
            format!("{field} must contain at most {max_items} items"),
        ));
        return None;
    }
    let mut result = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    out.push(violation(field, "required", format!("{field}[{i}] must not be empty")));
                } else if s.chars().count() > max_item_len {
                    out.push(violation(
                        field,
                        "max_length",
                        format!("{field}[{i}] must be at most {max_item_len} characters"),
                    ));
                } else {
                    result.push(s.to_string());
                }
            }
            _ => {
                out.push(violation(field, "type_check", format!("{field}[{i}] must be a string")));
            }
        }
    }
    if result.len() != items.len() {
        return None;
    }
    Some(result)
}
