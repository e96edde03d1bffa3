// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable adapter.
//!
//! This module provides the adapter that captures the process environment as a
//! coerced configuration layer.

use crate::domain::{coerce_all, ConfigObject};
use std::collections::HashMap;
use std::env;

/// Captures environment variables.
///
/// By default every call reads the live process environment; variables whose name or
/// value is not valid Unicode are treated as absent. Keys are kept exactly as they
/// appear; nothing is filtered or renamed.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::EnvVarAdapter;
/// use layercfg::domain::ConfigValue;
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("PORT".to_string(), "8080".to_string());
///
/// let adapter = EnvVarAdapter::with_values(values);
/// assert_eq!(adapter.snapshot()["PORT"], ConfigValue::Integer(8080));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    /// Fixed values replacing the process environment, if any
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the process environment.
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an adapter with pre-populated values.
    ///
    /// The process environment is never consulted. This is how tests and embedders
    /// supply an explicit environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Returns the raw variables, uncoerced.
    pub fn vars(&self) -> HashMap<String, String> {
        match &self.values {
            Some(values) => values.clone(),
            None => {
                let vars: HashMap<String, String> = env::vars_os()
                    .filter_map(|(key, value)| {
                        Some((key.into_string().ok()?, value.into_string().ok()?))
                    })
                    .collect();
                tracing::debug!("Loaded {} environment variables", vars.len());
                vars
            }
        }
    }

    /// Returns a single raw variable.
    pub fn var(&self, key: &str) -> Option<String> {
        match &self.values {
            Some(values) => values.get(key).cloned(),
            None => env::var(key).ok(),
        }
    }

    /// Returns every variable coerced to its most specific scalar.
    pub fn snapshot(&self) -> ConfigObject {
        coerce_all(self.vars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigValue;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_adapter_reads_process_environment() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_PROCESS_VAR", "17");

        let adapter = EnvVarAdapter::new();
        let snapshot = adapter.snapshot();

        assert_eq!(
            snapshot.get("LAYERCFG_TEST_PROCESS_VAR"),
            Some(&ConfigValue::Integer(17))
        );
        assert_eq!(
            adapter.var("LAYERCFG_TEST_PROCESS_VAR").as_deref(),
            Some("17")
        );
    }

    #[test]
    fn test_env_adapter_sees_later_changes() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_RELOAD", "initial");

        let adapter = EnvVarAdapter::new();
        assert_eq!(
            adapter.snapshot()["LAYERCFG_TEST_RELOAD"],
            ConfigValue::from("initial")
        );

        guard.set("LAYERCFG_TEST_RELOAD", "updated");
        assert_eq!(
            adapter.snapshot()["LAYERCFG_TEST_RELOAD"],
            ConfigValue::from("updated")
        );
    }

    #[test]
    fn test_env_adapter_keeps_keys_verbatim() {
        let mut guard = EnvGuard::new();
        guard.set("LayerCfg_Mixed_Case", "x");

        let snapshot = EnvVarAdapter::new().snapshot();
        assert!(snapshot.contains_key("LayerCfg_Mixed_Case"));
    }

    #[test]
    fn test_env_adapter_with_values_ignores_process() {
        let mut guard = EnvGuard::new();
        guard.set("LAYERCFG_TEST_IGNORED", "x");

        let mut values = HashMap::new();
        values.insert("DEBUG".to_string(), "TRUE".to_string());
        values.insert("RATIO".to_string(), "0.25".to_string());

        let adapter = EnvVarAdapter::with_values(values);
        let snapshot = adapter.snapshot();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["DEBUG"], ConfigValue::Bool(true));
        assert_eq!(snapshot["RATIO"], ConfigValue::Float(0.25));
        assert_eq!(adapter.var("LAYERCFG_TEST_IGNORED"), None);
    }

    #[test]
    fn test_env_adapter_default() {
        let adapter = EnvVarAdapter::default();
        assert!(adapter.values.is_none());
    }
}
