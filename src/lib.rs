// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered startup configuration.
//!
//! This crate merges application configuration from layer files, a managed secret
//! store and environment variables into one flat key/scalar mapping, resolved through
//! a fixed precedence chain.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`ConfigValue`, coercion, secret settings,
//!   validation, errors)
//! - **Ports**: Trait definitions for the collaborators (`LayerLoader`, `SecretStore`,
//!   `ConfigParser`)
//! - **Adapters**: Implementations for specific collaborators (YAML files, the `aws`
//!   tool, environment variables, in-memory)
//! - **Service**: The secret resolver and the loader that merges everything
//!
//! # Precedence
//!
//! Lowest to highest: `config.default`, `config.<env>`, `config.<env>.local`,
//! `config.local`, secrets, environment variables.
//!
//! # Feature Flags
//!
//! - `yaml`: Read layer files in YAML or JSON (default)
//! - `aws-cli`: Fetch secrets from AWS Secrets Manager through the `aws` tool (default)
//! - `cli`: Build the `layercfg` binary (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use layercfg::prelude::*;
//!
//! // Reads ./config/config.default.yaml, ./config/config.<env>.yaml, ...
//! let config = load_config(Some("config"));
//!
//! if let Some(port) = config.get("PORT") {
//!     println!("listening on {}", port);
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use service::{init, load_config};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{ConfigError, ConfigObject, ConfigValue, Result, SecretObject};
    pub use crate::ports::{ConfigParser, LayerLoader, SecretStore};
    pub use crate::service::{init, load_config, ConfigLoader, SecretResolver};

    // Re-export adapters based on feature flags
    pub use crate::adapters::{EnvVarAdapter, InMemoryLayerLoader, InMemorySecretStore};
    #[cfg(feature = "aws-cli")]
    pub use crate::adapters::AwsCliSecretStore;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileLoader, YamlParser};
}
