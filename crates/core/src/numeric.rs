//! Coercion of loosely-typed upstream scalars into numbers.
//!
//! Upstream rows mix real JSON numbers with strings such as `"87.34%"` or
//! `"1,234 days"`. Strings are reduced to their ASCII digits and dots before
//! parsing, so thousands separators and units simply disappear.

use serde_json::Value;

/// Coerce an upstream value into a number.
///
/// Returns `None` for `null`, empty or digit-free strings, booleans and
/// nested arrays/objects.
///
/// ```
/// use serde_json::json;
/// use sbtet_core::numeric::coerce;
///
/// assert_eq!(coerce(&json!("1,234.5 days")), Some(1234.5));
/// assert_eq!(coerce(&json!(42)), Some(42.0));
/// assert_eq!(coerce(&json!("")), None);
/// ```
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => coerce_str(s),
        _ => None,
    }
}

/// String half of [`coerce`].
pub fn coerce_str(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    leading_float(&cleaned)
}

/// Parse the number at the start of `raw`, ignoring whatever follows it.
///
/// Unlike [`coerce_str`] nothing is stripped from the middle of the text, so
/// `"8.12 out of 10"` reads as `8.12`.
pub fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    leading_float(digits).map(|n| sign * n)
}

/// Parse the longest `digits[.digits]` prefix. Anything after a second dot
/// is ignored, so `"1.2.3"` reads as `1.2`.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }

    if !seen_digit {
        return None;
    }
    let prefix = s[..end].trim_end_matches('.');
    if prefix.starts_with('.') {
        format!("0{prefix}").parse().ok()
    } else {
        prefix.parse().ok()
    }
}
