// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory layer and secret adapters.
//!
//! These adapters hold their content directly. They suit embedding (layers compiled
//! into the binary) and tests, where the secret store also records what it was asked
//! for.

use crate::domain::{ConfigError, ConfigObject, Result, SecretObject, SecretRequest};
use crate::ports::{LayerLoader, SecretStore};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Layer loader backed by a map of layer name to content.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::InMemoryLayerLoader;
/// use layercfg::domain::{ConfigObject, ConfigValue};
/// use layercfg::ports::LayerLoader;
///
/// let mut defaults = ConfigObject::new();
/// defaults.insert("PORT".into(), ConfigValue::from(8080));
///
/// let loader = InMemoryLayerLoader::new().with_layer("config.default", defaults);
/// assert!(loader.load("config.default").unwrap().is_some());
/// assert!(loader.load("config.local").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayerLoader {
    layers: HashMap<String, ConfigObject>,
    broken: HashSet<String>,
}

impl InMemoryLayerLoader {
    /// Creates a loader with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer.
    pub fn with_layer(mut self, name: impl Into<String>, values: ConfigObject) -> Self {
        self.layers.insert(name.into(), values);
        self
    }

    /// Marks a layer as present but unreadable; loading it returns an error.
    pub fn with_broken_layer(mut self, name: impl Into<String>) -> Self {
        self.broken.insert(name.into());
        self
    }
}

impl LayerLoader for InMemoryLayerLoader {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, layer: &str) -> Result<Option<ConfigObject>> {
        if self.broken.contains(layer) {
            return Err(ConfigError::ParseError {
                message: format!("Layer '{}' is unreadable", layer),
                source: None,
            });
        }
        Ok(self.layers.get(layer).cloned())
    }
}

/// Secret store backed by a map of secret name to payload.
///
/// Unknown names and names marked failing produce errors. Every request is
/// recorded and can be inspected with [`InMemorySecretStore::requests`].
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::InMemorySecretStore;
/// use layercfg::domain::SecretSettings;
/// use layercfg::ports::SecretStore;
///
/// let store = InMemorySecretStore::new().with_secret("app", [("TOKEN", "abc")]);
/// let secret = store.fetch(&SecretSettings::default().request("app")).unwrap();
///
/// assert_eq!(secret["TOKEN"], "abc");
/// assert_eq!(store.requests().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, SecretObject>,
    failing: HashSet<String>,
    requests: Mutex<Vec<SecretRequest>>,
}

impl InMemorySecretStore {
    /// Creates a store with no secrets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret.
    pub fn with_secret<I, K, V>(mut self, name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let secret = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.secrets.insert(name.into(), secret);
        self
    }

    /// Makes every fetch of `name` fail.
    pub fn with_failing_secret(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    /// Returns the requests received so far, in order.
    pub fn requests(&self) -> Vec<SecretRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SecretStore for InMemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, request: &SecretRequest) -> Result<SecretObject> {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        if self.failing.contains(&request.name) {
            return Err(ConfigError::secret_store(
                &request.name,
                "Secret store unavailable",
            ));
        }

        self.secrets
            .get(&request.name)
            .cloned()
            .ok_or_else(|| ConfigError::secret_store(&request.name, "Secret not found"))
    }
}
