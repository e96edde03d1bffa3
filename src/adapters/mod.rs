// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete collaborators.
//!
//! This module contains implementations of the ports: where layers come from,
//! where secrets come from, and how the process environment is captured.

#[cfg(feature = "aws-cli")]
pub mod aws_cli;
pub mod env_var;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "aws-cli")]
pub use aws_cli::AwsCliSecretStore;
pub use env_var::EnvVarAdapter;
pub use memory::{InMemoryLayerLoader, InMemorySecretStore};
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileLoader, YamlParser};
