//! Scalar resolution and quoting rules.
//!
//! Plain scalars resolve through the YAML 1.2 core schema. The quoting helpers
//! decide whether a string can be written back plain or needs quotes.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Number, Value};

static INT_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid integer regex"));
static INT_OCTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0o[0-7]+$").expect("valid octal regex"));
static INT_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").expect("valid hex regex"));
static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$").expect("valid float regex")
});
static FLOAT_INF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\.(inf|Inf|INF)$").expect("valid inf regex"));
static FLOAT_NAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(nan|NaN|NAN)$").expect("valid nan regex"));

/// Resolve an untagged plain scalar to a value.
pub(crate) fn resolve_plain(value: &str) -> Value {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }

    if INT_DECIMAL.is_match(value) {
        if let Ok(i) = value.parse::<i64>() {
            return Value::Number(i.into());
        }
        if let Ok(u) = value.trim_start_matches('+').parse::<u64>() {
            return Value::Number(u.into());
        }
    }
    if INT_OCTAL.is_match(value) {
        if let Ok(i) = i64::from_str_radix(&value[2..], 8) {
            return Value::Number(i.into());
        }
    }
    if INT_HEX.is_match(value) {
        if let Ok(i) = i64::from_str_radix(&value[2..], 16) {
            return Value::Number(i.into());
        }
    }
    if FLOAT.is_match(value) {
        if let Ok(f) = value.parse::<f64>() {
            return Value::Number(Number::from(f));
        }
    }
    if FLOAT_INF.is_match(value) {
        let inf = if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Value::Number(Number::from(inf));
    }
    if FLOAT_NAN.is_match(value) {
        return Value::Number(Number::from(f64::NAN));
    }

    Value::String(value.to_string())
}

/// Resolve a scalar carrying a `!!` core tag.
pub(crate) fn resolve_tagged(tag: &str, value: &str) -> Value {
    match tag {
        "!!str" | "!!binary" | "!!timestamp" => Value::String(value.to_string()),
        "!!null" => Value::Null,
        _ => resolve_plain(value),
    }
}

/// Whether `value` round-trips as a plain scalar without changing structure.
///
/// The check is purely syntactic. Callers that also need the value to stay a
/// string must check [`resolve_plain`] separately.
pub(crate) fn plain_allowed(value: &str, flow: bool) -> bool {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return false;
    }
    if value.chars().any(|c| c.is_control()) {
        return false;
    }
    if value == "---" || value == "..." || value.starts_with("--- ") || value.starts_with("... ")
    {
        return false;
    }
    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return false;
    }
    if flow && value.chars().any(|c| matches!(c, ',' | '[' | ']' | '{' | '}')) {
        return false;
    }
    match first {
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => false,
        '-' | '?' | ':' => match chars.next() {
            None => false,
            Some(next) => !next.is_whitespace() && !(flow && matches!(next, ',' | '[' | ']' | '{' | '}')),
        },
        _ => true,
    }
}

/// Whether a string value can be written plain and still decode as a string.
pub(crate) fn plain_string_allowed(value: &str) -> bool {
    plain_allowed(value, false) && matches!(resolve_plain(value), Value::String(_))
}

pub(crate) fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xff {
                    out.push_str(&format!("\\x{:02x}", code));
                } else {
                    out.push_str(&format!("\\u{:04x}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
