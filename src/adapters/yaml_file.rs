// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file layer adapter.
//!
//! This module provides the parser and loader that read configuration layers from
//! YAML files in a directory. JSON files are read by the same parser, since YAML is
//! a superset of JSON.

use crate::domain::{ConfigError, ConfigObject, ConfigValue, Result};
use crate::ports::{ConfigParser, LayerLoader};
use directories::ProjectDirs;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration layer files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Top-level key whose mapping, when present, stands in for the whole document.
const DEFAULT_SECTION: &str = "default";

/// YAML parser implementation.
///
/// The document must be a mapping of keys to scalars. If it contains a `default`
/// mapping, only that mapping is read. Nested mappings and sequences are not
/// configuration values and are skipped with a warning; `null` becomes an empty
/// string.
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::YamlParser;
/// use layercfg::domain::ConfigValue;
/// use layercfg::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let result = parser.parse("DB_HOST: localhost\nDB_PORT: 5432").unwrap();
/// assert_eq!(result.get("DB_HOST"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(result.get("DB_PORT"), Some(&ConfigValue::Integer(5432)));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn key_text(key: &Value) -> Option<String> {
        match key {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn scalar(value: &Value) -> Option<ConfigValue> {
        match value {
            Value::String(s) => Some(ConfigValue::String(s.clone())),
            Value::Bool(b) => Some(ConfigValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Integer(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            Value::Null => Some(ConfigValue::String(String::new())),
            Value::Tagged(tagged) => Self::scalar(&tagged.value),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigObject> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        let mapping = match document {
            Value::Null => return Ok(ConfigObject::new()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::ParseError {
                    message: "Configuration document must be a mapping".to_string(),
                    source: None,
                })
            }
        };

        let section = match mapping.get(DEFAULT_SECTION) {
            Some(Value::Mapping(section)) => Some(section.clone()),
            _ => None,
        };
        let mapping = section.unwrap_or(mapping);

        let mut result = ConfigObject::new();
        for (key, value) in &mapping {
            let Some(key) = Self::key_text(key) else {
                tracing::warn!("Skipping configuration entry with a non-scalar key");
                continue;
            };
            match Self::scalar(value) {
                Some(scalar) => {
                    result.insert(key, scalar);
                }
                None => {
                    tracing::warn!("Skipping nested configuration value for {}", key);
                }
            }
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml", "json"]
    }
}

/// Layer loader reading `<layer>.<ext>` files from one directory.
///
/// For each layer the extensions `yaml`, `yml` and `json` are tried in that order;
/// the first existing file is used. A missing file means the layer is absent.
///
/// # Examples
///
/// ```rust,no_run
/// use layercfg::adapters::YamlFileLoader;
/// use layercfg::ports::LayerLoader;
///
/// // Reads ./config/config.default.yaml and friends
/// let loader = YamlFileLoader::from_base(".", "config");
/// let defaults = loader.load("config.default").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileLoader {
    /// Directory holding the layer files
    directory: PathBuf,
    /// YAML parser
    parser: YamlParser,
}

impl YamlFileLoader {
    /// Creates a loader over the given directory.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            parser: YamlParser::new(),
        }
    }

    /// Creates a loader over `<base>/<config_path>`.
    ///
    /// An empty `config_path` reads straight from `base`.
    pub fn from_base<P: AsRef<Path>>(base: P, config_path: &str) -> Self {
        Self::new(base.as_ref().join(config_path))
    }

    /// Creates a loader over the OS-appropriate configuration directory.
    ///
    /// This uses the `directories` crate to find, for example,
    /// `~/.config/<app_name>` on Linux.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::new(proj_dirs.config_dir()))
    }

    /// Returns the directory layers are read from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file that would be read for `layer`, if one exists.
    pub fn resolve(&self, layer: &str) -> Option<PathBuf> {
        self.parser
            .supported_extensions()
            .iter()
            .map(|ext| self.directory.join(format!("{}.{}", layer, ext)))
            .find(|path| path.is_file())
    }

    fn read(path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>");

        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!("Failed to read file metadata: {}", file_name),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!("Failed to read configuration file: {}", file_name),
            source: Some(Box::new(e)),
        })
    }
}

impl LayerLoader for YamlFileLoader {
    fn name(&self) -> &str {
        "yaml-file"
    }

    fn load(&self, layer: &str) -> Result<Option<ConfigObject>> {
        let Some(path) = self.resolve(layer) else {
            tracing::debug!(
                "No file for layer '{}' in {}",
                layer,
                self.directory.display()
            );
            return Ok(None);
        };

        let content = Self::read(&path)?;
        let values = self.parser.parse(&content)?;
        tracing::debug!("Loaded {} keys from {}", values.len(), path.display());
        Ok(Some(values))
    }
}
