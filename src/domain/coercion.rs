// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scalar coercion for string-sourced values.
//!
//! Environment variables and secret values arrive as plain strings. Before they are
//! merged they are turned into the most specific scalar they spell:
//!
//! - `"true"` / `"false"` in any letter case become booleans
//! - `digits.digits` becomes a float
//! - `digits` becomes an integer
//! - everything else stays a string
//!
//! Signs, exponents, surrounding whitespace and locale separators are not numbers
//! here; such strings pass through untouched.

use crate::domain::config_value::{ConfigObject, ConfigValue};

/// Converts a raw string into its most specific scalar.
///
/// Never fails: anything unrecognized is returned as [`ConfigValue::String`]. A
/// digit run too long for `i64` is still numeric and becomes a float.
///
/// # Examples
///
/// ```
/// use layercfg::domain::coercion::coerce;
/// use layercfg::domain::ConfigValue;
///
/// assert_eq!(coerce("TRUE"), ConfigValue::Bool(true));
/// assert_eq!(coerce("5000"), ConfigValue::Integer(5000));
/// assert_eq!(coerce("1.5"), ConfigValue::Float(1.5));
/// assert_eq!(coerce("-1"), ConfigValue::from("-1"));
/// ```
pub fn coerce(raw: &str) -> ConfigValue {
    if raw.eq_ignore_ascii_case("true") {
        return ConfigValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return ConfigValue::Bool(false);
    }

    if let Some((whole, fraction)) = raw.split_once('.') {
        if is_digits(whole) && is_digits(fraction) {
            if let Ok(f) = raw.parse::<f64>() {
                return ConfigValue::Float(f);
            }
        }
    } else if is_digits(raw) {
        return match raw.parse::<i64>() {
            Ok(i) => ConfigValue::Integer(i),
            Err(_) => match raw.parse::<f64>() {
                Ok(f) => ConfigValue::Float(f),
                Err(_) => ConfigValue::from(raw),
            },
        };
    }

    ConfigValue::from(raw)
}

/// Coerces every value of a string map into a [`ConfigObject`].
pub fn coerce_all<I, K, V>(entries: I) -> ConfigObject
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), coerce(value.as_ref())))
        .collect()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
