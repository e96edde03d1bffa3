// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type and the flat mappings built from it.
//!
//! Every resolved configuration entry is a flat scalar: a boolean, an integer, a
//! float, or a string. Values coming from files keep the type the file gave them;
//! values coming from environment variables and secrets start out as strings and are
//! turned into the most specific scalar by [`coerce`](crate::domain::coercion::coerce).

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The merged configuration: string keys mapped to flat scalars.
///
/// Keys are case-sensitive. Later layers overwrite earlier ones by key.
pub type ConfigObject = BTreeMap<String, ConfigValue>;

/// Raw secret values as returned by a secret store, before coercion.
pub type SecretObject = BTreeMap<String, String>;

/// A single flat configuration scalar.
///
/// # Examples
///
/// ```
/// use layercfg::domain::ConfigValue;
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i64("PORT").unwrap(), 42);
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean flag.
    Bool(bool),
    /// A whole number.
    Integer(i64),
    /// A number with a fractional part.
    Float(f64),
    /// Anything else, kept verbatim.
    String(String),
}

impl ConfigValue {
    /// Returns a short name for the kind of scalar held.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
        }
    }

    /// Returns the string slice if this is a string value.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("eu-west-1").as_str(), Some("eu-west-1"));
    /// assert_eq!(ConfigValue::from(true).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// String values are parsed with [`str::parse`]; numbers are rejected.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => s
                .parse::<bool>()
                .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            other => Err(other.mismatch(key, "boolean")),
        }
    }

    /// Converts the value to an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layercfg::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("-7").as_i64("OFFSET").unwrap(), -7);
    /// assert!(ConfigValue::from(1.5).as_i64("OFFSET").is_err());
    /// ```
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(i) => Ok(*i),
            ConfigValue::String(s) => s
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(other.mismatch(key, "integer")),
        }
    }

    /// Converts the value to an `f64`. Integers widen losslessly where they can.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(i) => Ok(*i as f64),
            ConfigValue::String(s) => s
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(other.mismatch(key, "float")),
        }
    }

    fn mismatch(&self, key: &str, expected: &'static str) -> ConfigError {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: self.kind(),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => write!(f, "{}", s),
        }
    }
}
