// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the scalar value model, string coercion, secret settings and
//! validation. It is independent of how layers, secrets or environment variables
//! are actually obtained.

pub mod coercion;
pub mod config_value;
pub mod errors;
pub mod secrets;
pub mod validation;

// Re-export commonly used types
pub use coercion::{coerce, coerce_all};
pub use config_value::{ConfigObject, ConfigValue, SecretObject};
pub use errors::{ConfigError, Result};
pub use secrets::{parse_secret_payload, SecretRequest, SecretSettings};
pub use validation::{check, validate_config, ValidationWarning};
