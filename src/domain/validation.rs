// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic checks over a merged configuration.
//!
//! Validation only reports; it never removes, rewrites or rejects a value.

use crate::domain::config_value::{ConfigObject, ConfigValue};
use std::fmt;

/// A problem spotted in a configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The value is empty or the literal text `undefined`.
    Undefined {
        /// The offending key
        key: String,
    },
    /// The value is a string with leading or trailing whitespace.
    Whitespace {
        /// The offending key
        key: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::Undefined { key } => {
                write!(f, "Found undefined config value for {}", key)
            }
            ValidationWarning::Whitespace { key } => write!(
                f,
                "Found leading and/or trailing whitespace within config value for {}",
                key
            ),
        }
    }
}

/// Collects the warnings for every key of `config`.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{check, ConfigObject, ConfigValue, ValidationWarning};
///
/// let mut config = ConfigObject::new();
/// config.insert("API_URL".into(), ConfigValue::from(""));
///
/// assert_eq!(
///     check(&config),
///     vec![ValidationWarning::Undefined { key: "API_URL".into() }]
/// );
/// ```
pub fn check(config: &ConfigObject) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (key, value) in config {
        let ConfigValue::String(s) = value else {
            continue;
        };

        if s.is_empty() || s == "undefined" {
            warnings.push(ValidationWarning::Undefined { key: key.clone() });
        }

        let trimmed = s.trim();
        if !s.is_empty() && trimmed.len() != s.len() {
            warnings.push(ValidationWarning::Whitespace { key: key.clone() });
        }
    }

    warnings
}

/// Logs a warning for every problem in `config` and hands it back unchanged.
pub fn validate_config(config: ConfigObject) -> ConfigObject {
    for warning in check(&config) {
        tracing::warn!("{}", warning);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entries: &[(&str, ConfigValue)]) -> ConfigObject {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let cfg = config(&[
            ("HOST", "db.internal".into()),
            ("PORT", 5432.into()),
            ("DEBUG", false.into()),
            ("RATIO", 0.0.into()),
        ]);
        assert!(check(&cfg).is_empty());
    }

    #[test]
    fn test_empty_and_undefined() {
        let cfg = config(&[("A", "".into()), ("B", "undefined".into())]);
        assert_eq!(
            check(&cfg),
            vec![
                ValidationWarning::Undefined { key: "A".into() },
                ValidationWarning::Undefined { key: "B".into() },
            ]
        );
    }

    #[test]
    fn test_whitespace() {
        let cfg = config(&[
            ("LEAD", " x".into()),
            ("TRAIL", "x\t".into()),
            ("INNER", "a b".into()),
        ]);
        assert_eq!(
            check(&cfg),
            vec![
                ValidationWarning::Whitespace { key: "LEAD".into() },
                ValidationWarning::Whitespace {
                    key: "TRAIL".into()
                },
            ]
        );
    }

    #[test]
    fn test_blank_string_is_whitespace_not_undefined() {
        let cfg = config(&[("BLANK", "   ".into())]);
        assert_eq!(
            check(&cfg),
            vec![ValidationWarning::Whitespace {
                key: "BLANK".into()
            }]
        );
    }

    #[test]
    fn test_validate_config_returns_input_unchanged() {
        let cfg = config(&[("x", "".into()), ("y", " padded ".into())]);
        let validated = validate_config(cfg.clone());
        assert_eq!(validated, cfg);
        assert_eq!(validated["x"], ConfigValue::from(""));
    }

    #[test]
    fn test_warning_messages() {
        let undefined = ValidationWarning::Undefined { key: "K".into() };
        let whitespace = ValidationWarning::Whitespace { key: "K".into() };
        assert_eq!(undefined.to_string(), "Found undefined config value for K");
        assert!(whitespace.to_string().contains("whitespace"));
    }
}
