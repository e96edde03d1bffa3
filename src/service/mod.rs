// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration assembly.
//!
//! This module wires the ports together: it resolves secrets and merges every layer
//! into the final configuration.

pub mod config_loader;
pub mod secret_resolver;

// Re-export commonly used types
pub use config_loader::{
    init, layer_names, load_config, ConfigLoader, ConfigLoaderBuilder, DEFAULT_ENVIRONMENT,
    ENVIRONMENT_VARIABLES,
};
pub use secret_resolver::SecretResolver;
