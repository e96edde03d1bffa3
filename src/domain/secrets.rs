// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret-store settings read out of configuration layers.
//!
//! Four logical settings steer secret resolution. Each can be spelled in
//! upper-snake case or camel case; both spellings are folded into one field here,
//! with the upper-snake spelling winning when a layer carries both.

use crate::domain::config_value::{ConfigObject, ConfigValue, SecretObject};
use crate::domain::errors::{ConfigError, Result};
use indexmap::IndexSet;
use std::time::Duration;

/// Upper-snake key for a single secret name.
pub const SECRET_NAME_KEY: &str = "AWS_SECRETS_MANAGER_NAME";
/// Upper-snake key for a comma-separated list of secret names.
pub const SECRET_NAMES_KEY: &str = "AWS_SECRETS_MANAGER_NAMES";
/// Upper-snake key for the secret-store region.
pub const SECRET_REGION_KEY: &str = "AWS_SECRETS_MANAGER_REGION";
/// Upper-snake key for the per-fetch timeout in milliseconds.
pub const SECRET_TIMEOUT_KEY: &str = "AWS_SECRETS_MANAGER_TIMEOUT";

const NAME_KEYS: [&str; 2] = [SECRET_NAME_KEY, "awsSecretsManagerName"];
const NAMES_KEYS: [&str; 2] = [SECRET_NAMES_KEY, "awsSecretsManagerNames"];
const REGION_KEYS: [&str; 2] = [SECRET_REGION_KEY, "awsSecretsManagerRegion"];
const TIMEOUT_KEYS: [&str; 2] = [SECRET_TIMEOUT_KEY, "awsSecretsManagerTimeout"];

/// Timeout used when no layer supplies one.
pub const DEFAULT_SECRET_TIMEOUT_MS: u64 = 5000;

/// Secret-store settings taken from one configuration layer.
///
/// Every field is optional; [`SecretSettings::or`] combines an overriding layer with
/// a fallback field by field.
///
/// # Examples
///
/// ```
/// use layercfg::domain::{ConfigObject, ConfigValue, SecretSettings};
///
/// let mut env = ConfigObject::new();
/// env.insert("AWS_SECRETS_MANAGER_NAME".into(), ConfigValue::from("app/prod"));
/// env.insert("awsSecretsManagerNames".into(), ConfigValue::from("shared, app/prod"));
///
/// let settings = SecretSettings::from_config(&env);
/// let names: Vec<_> = settings.secret_names().into_iter().collect();
/// assert_eq!(names, ["app/prod", "shared"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretSettings {
    /// A single secret name.
    pub name: Option<String>,
    /// A comma-separated list of secret names.
    pub names: Option<String>,
    /// The region passed to the secret store.
    pub region: Option<String>,
    /// Per-fetch timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl SecretSettings {
    /// Reads the settings from a configuration layer, accepting either spelling.
    ///
    /// Empty text counts as absent. A timeout must be a positive whole number of
    /// milliseconds (a positive float is truncated); anything else is ignored.
    pub fn from_config(config: &ConfigObject) -> Self {
        Self {
            name: read_text(config, &NAME_KEYS),
            names: read_text(config, &NAMES_KEYS),
            region: read_text(config, &REGION_KEYS),
            timeout_ms: read_timeout(config, &TIMEOUT_KEYS),
        }
    }

    /// Fills each absent field from `fallback`.
    pub fn or(self, fallback: SecretSettings) -> Self {
        Self {
            name: self.name.or(fallback.name),
            names: self.names.or(fallback.names),
            region: self.region.or(fallback.region),
            timeout_ms: self.timeout_ms.or(fallback.timeout_ms),
        }
    }

    /// Returns the unique secret names in fetch order.
    ///
    /// The single name comes first, followed by the list entries in their listed
    /// order. List entries are trimmed and empty entries dropped.
    pub fn secret_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();

        if let Some(name) = &self.name {
            names.insert(name.clone());
        }

        if let Some(list) = &self.names {
            names.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_string),
            );
        }

        names
    }

    /// Returns the per-fetch timeout, defaulting to 5000 ms.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_SECRET_TIMEOUT_MS))
    }

    /// Builds the store request for one secret name.
    pub fn request(&self, name: &str) -> SecretRequest {
        SecretRequest {
            name: name.to_string(),
            region: self.region.clone(),
            timeout: self.timeout(),
        }
    }
}

/// A single lookup handed to a secret store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretRequest {
    /// The secret's name in the store.
    pub name: String,
    /// The store region, if configured.
    pub region: Option<String>,
    /// How long the store may take to answer.
    pub timeout: Duration,
}

/// Parses a secret payload into raw key/value strings.
///
/// The payload must be a JSON object. String members are kept as-is; numbers and
/// booleans are rendered back to text so they go through the same coercion as
/// everything else. Null and nested members are dropped.
///
/// # Examples
///
/// ```
/// use layercfg::domain::parse_secret_payload;
///
/// let secret = parse_secret_payload(r#"{"DB_PASSWORD":"hunter2","DB_PORT":5432}"#).unwrap();
/// assert_eq!(secret["DB_PASSWORD"], "hunter2");
/// assert_eq!(secret["DB_PORT"], "5432");
/// ```
pub fn parse_secret_payload(payload: &str) -> Result<SecretObject> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| ConfigError::ParseError {
            message: format!("Secret payload is not valid JSON: {}", e),
            source: Some(Box::new(e)),
        })?;

    let serde_json::Value::Object(members) = value else {
        return Err(ConfigError::ParseError {
            message: "Secret payload is not a JSON object".to_string(),
            source: None,
        });
    };

    let mut secret = SecretObject::new();
    for (key, member) in members {
        match member {
            serde_json::Value::String(s) => {
                secret.insert(key, s);
            }
            serde_json::Value::Number(n) => {
                secret.insert(key, n.to_string());
            }
            serde_json::Value::Bool(b) => {
                secret.insert(key, b.to_string());
            }
            serde_json::Value::Null => {}
            _ => {
                tracing::debug!("Skipping nested secret member '{}'", key);
            }
        }
    }

    Ok(secret)
}

fn read_text(config: &ConfigObject, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| config.get(*key))
        .map(ConfigValue::to_string)
        .find(|text| !text.is_empty())
}

fn read_timeout(config: &ConfigObject, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .filter_map(|key| config.get(*key))
        .find_map(|value| match value {
            ConfigValue::Integer(i) if *i > 0 => Some(*i as u64),
            ConfigValue::Float(f) if *f >= 1.0 => Some(*f as u64),
            ConfigValue::String(s) => s.trim().parse::<u64>().ok().filter(|ms| *ms > 0),
            _ => None,
        })
}
