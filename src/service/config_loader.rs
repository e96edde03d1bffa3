// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration assembly.
//!
//! This module provides [`ConfigLoader`], which merges file layers, secrets and
//! environment variables into one flat configuration, and the top-level entry points
//! [`init`] and [`load_config`].
//!
//! # Precedence
//!
//! From lowest to highest:
//!
//! 1. `config.default`
//! 2. `config.<environment>`
//! 3. `config.<environment>.local`
//! 4. `config.local`
//! 5. secrets named by the settings in the layers above or the environment
//! 6. environment variables

use crate::adapters::EnvVarAdapter;
use crate::domain::{validate_config, ConfigObject};
use crate::ports::{LayerLoader, SecretStore};
use crate::service::secret_resolver::SecretResolver;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment name used when none is selected.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Variables consulted, in order, to select the environment.
pub const ENVIRONMENT_VARIABLES: [&str; 2] = ["APP_ENV", "NODE_ENV"];

/// Environments whose configuration is returned without validation.
const UNVALIDATED_ENVIRONMENTS: [&str; 2] = ["test", "development"];

/// Returns the file layer names for an environment, lowest precedence first.
///
/// # Examples
///
/// ```
/// use layercfg::service::layer_names;
///
/// assert_eq!(
///     layer_names("production"),
///     ["config.default", "config.production", "config.production.local", "config.local"]
/// );
/// ```
pub fn layer_names(environment: &str) -> [String; 4] {
    [
        "config.default".to_string(),
        format!("config.{}", environment),
        format!("config.{}.local", environment),
        "config.local".to_string(),
    ]
}

/// Loads the configuration from the current directory with default collaborators.
///
/// Equivalent to `load_config(None)`.
pub fn init() -> ConfigObject {
    load_config(None)
}

/// Loads the configuration, reading layer files from `<cwd>/<config_path>`.
///
/// Never fails; unreadable layers and unavailable secrets are logged and skipped.
pub fn load_config(config_path: Option<&str>) -> ConfigObject {
    ConfigLoader::builder()
        .config_path(config_path.unwrap_or_default())
        .build()
        .load()
}

/// Merges configuration layers, secrets and environment variables.
///
/// Every call to [`ConfigLoader::load`] reads all sources afresh and builds a new
/// mapping; nothing is cached between calls.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::{InMemoryLayerLoader, InMemorySecretStore};
/// use layercfg::domain::{ConfigObject, ConfigValue};
/// use layercfg::service::ConfigLoader;
/// use std::collections::HashMap;
///
/// let mut defaults = ConfigObject::new();
/// defaults.insert("REGION".into(), ConfigValue::from("us-east-1"));
///
/// let mut env = HashMap::new();
/// env.insert("REGION".to_string(), "eu-west-1".to_string());
///
/// let loader = ConfigLoader::builder()
///     .with_layer_loader(Box::new(
///         InMemoryLayerLoader::new().with_layer("config.default", defaults),
///     ))
///     .with_secret_store(Box::new(InMemorySecretStore::new()))
///     .with_env_values(env)
///     .build();
///
/// assert_eq!(loader.load()["REGION"], ConfigValue::from("eu-west-1"));
/// ```
pub struct ConfigLoader {
    /// Source of the file layers
    layers: Box<dyn LayerLoader>,
    /// Source of secret values
    secrets: Box<dyn SecretStore>,
    /// Environment variables
    env: EnvVarAdapter,
    /// Explicitly selected environment
    environment: Option<String>,
    /// Variables that select the environment
    environment_variables: Vec<String>,
}

impl ConfigLoader {
    /// Creates a new builder.
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new()
    }

    /// Returns the active environment name.
    ///
    /// An explicitly configured environment wins; otherwise the first non-empty
    /// selector variable; otherwise `"development"`.
    pub fn environment(&self) -> String {
        if let Some(environment) = &self.environment {
            return environment.clone();
        }

        self.environment_variables
            .iter()
            .filter_map(|name| self.env.var(name))
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Loads and merges the four file layers for `environment`.
    pub fn load_files(&self, environment: &str) -> ConfigObject {
        let mut merged = ConfigObject::new();
        for layer in layer_names(environment) {
            if let Some(values) = load_layer(self.layers.as_ref(), &layer) {
                merged.extend(values);
            }
        }
        merged
    }

    /// Builds the merged configuration.
    ///
    /// Outside the `test` and `development` environments the result is checked for
    /// empty and whitespace-padded values; problems are logged, never removed.
    pub fn load(&self) -> ConfigObject {
        let environment = self.environment();
        tracing::debug!("Loading configuration for environment '{}'", environment);

        let files = self.load_files(&environment);
        let env = self.env.snapshot();
        let secrets = SecretResolver::new(self.secrets.as_ref()).resolve(&files, &env);

        tracing::debug!(
            "Merging {} file key(s), {} secret key(s), {} environment key(s)",
            files.len(),
            secrets.len(),
            env.len()
        );

        let mut config = files;
        config.extend(secrets);
        config.extend(env);

        if UNVALIDATED_ENVIRONMENTS.contains(&environment.as_str()) {
            config
        } else {
            validate_config(config)
        }
    }
}

/// Loads one layer, logging and swallowing any failure.
fn load_layer(loader: &dyn LayerLoader, layer: &str) -> Option<ConfigObject> {
    match loader.load(layer) {
        Ok(Some(values)) => {
            if is_local_layer(layer) {
                tracing::warn!("Found a local config file {}", layer);
            }
            Some(values)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::error!(
                "Unable to load config layer '{}' from '{}': {}",
                layer,
                loader.name(),
                e
            );
            None
        }
    }
}

/// Matches `config`, at least one character, then `local`.
fn is_local_layer(name: &str) -> bool {
    name.match_indices("config").any(|(i, m)| {
        let rest = &name[i + m.len()..];
        rest.char_indices()
            .skip(1)
            .any(|(j, _)| rest[j..].starts_with("local"))
    })
}

/// Builder for constructing a [`ConfigLoader`].
///
/// Unset collaborators fall back to defaults: layer files under
/// `<base_dir>/<config_path>` (base directory defaults to the current directory),
/// the `aws` tool as secret store, and the process environment.
pub struct ConfigLoaderBuilder {
    base_dir: Option<PathBuf>,
    config_path: String,
    environment: Option<String>,
    environment_variables: Vec<String>,
    layers: Option<Box<dyn LayerLoader>>,
    secrets: Option<Box<dyn SecretStore>>,
    env: Option<EnvVarAdapter>,
}

impl ConfigLoaderBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            base_dir: None,
            config_path: String::new(),
            environment: None,
            environment_variables: ENVIRONMENT_VARIABLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            layers: None,
            secrets: None,
            env: None,
        }
    }

    /// Sets the directory layer paths are resolved against.
    pub fn base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the sub-path, relative to the base directory, holding layer files.
    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Selects the environment explicitly, ignoring the selector variables.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Uses a single variable, instead of `APP_ENV` then `NODE_ENV`, to select the
    /// environment.
    pub fn environment_variable(mut self, name: impl Into<String>) -> Self {
        self.environment_variables = vec![name.into()];
        self
    }

    /// Uses the given layer loader instead of layer files.
    pub fn with_layer_loader(mut self, loader: Box<dyn LayerLoader>) -> Self {
        self.layers = Some(loader);
        self
    }

    /// Uses the given secret store.
    pub fn with_secret_store(mut self, store: Box<dyn SecretStore>) -> Self {
        self.secrets = Some(store);
        self
    }

    /// Uses a fixed set of environment variables instead of the process environment.
    pub fn with_env_values(mut self, values: HashMap<String, String>) -> Self {
        self.env = Some(EnvVarAdapter::with_values(values));
        self
    }

    /// Builds the loader.
    pub fn build(self) -> ConfigLoader {
        let layers = match self.layers {
            Some(layers) => layers,
            None => {
                let base_dir = self.base_dir.unwrap_or_else(working_directory);
                default_layer_loader(&base_dir, &self.config_path)
            }
        };

        ConfigLoader {
            layers,
            secrets: self.secrets.unwrap_or_else(default_secret_store),
            env: self.env.unwrap_or_default(),
            environment: self.environment,
            environment_variables: self.environment_variables,
        }
    }
}

impl Default for ConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn working_directory() -> PathBuf {
    match std::env::current_dir().and_then(|dir| dir.canonicalize()) {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Unable to resolve the working directory, using '.': {}", e);
            PathBuf::from(".")
        }
    }
}

#[cfg(feature = "yaml")]
fn default_layer_loader(base_dir: &Path, config_path: &str) -> Box<dyn LayerLoader> {
    Box::new(crate::adapters::YamlFileLoader::from_base(base_dir, config_path))
}

#[cfg(not(feature = "yaml"))]
fn default_layer_loader(base_dir: &Path, config_path: &str) -> Box<dyn LayerLoader> {
    tracing::warn!(
        "No file layer support compiled in; ignoring {}",
        base_dir.join(config_path).display()
    );
    Box::new(crate::adapters::InMemoryLayerLoader::new())
}

#[cfg(feature = "aws-cli")]
fn default_secret_store() -> Box<dyn SecretStore> {
    Box::new(crate::adapters::AwsCliSecretStore::new())
}

#[cfg(not(feature = "aws-cli"))]
fn default_secret_store() -> Box<dyn SecretStore> {
    Box::new(crate::adapters::InMemorySecretStore::new())
}
