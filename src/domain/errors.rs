// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the errors produced at the edges of the system: reading a
//! layer, parsing it, fetching a secret, or converting a value to a requested type.
//! The loader itself never surfaces these to its callers; they are logged and the
//! offending layer or secret contributes nothing.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// fn fetch() -> Result<String, ConfigError> {
///     Err(ConfigError::SecretStoreError {
///         secret_name: "prod/api".to_string(),
///         message: "access denied".to_string(),
///         source: None,
///     })
/// }
///
/// assert!(fetch().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The value held for a key is a different scalar kind than requested.
    #[error("Configuration value for key '{key}' is a {found}, expected {expected}")]
    TypeMismatch {
        /// The key being converted
        key: String,
        /// The requested kind
        expected: &'static str,
        /// The kind actually stored
        found: &'static str,
    },

    /// An error occurred in a configuration layer source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or secret payload.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The secret store could not produce a value for a secret name.
    #[error("Secret store error for '{secret_name}': {message}")]
    SecretStoreError {
        /// The secret that was requested
        secret_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a SecretStoreError without an underlying cause.
    pub fn secret_store(secret_name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SecretStoreError {
            secret_name: secret_name.into(),
            message: message.into(),
            source: None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
