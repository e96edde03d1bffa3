// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) through which the service
//! layer reaches its external collaborators: layer files and the secret store.
//! These traits are implemented by adapters in the adapters layer.

pub mod layer_loader;
pub mod parser;
pub mod secret_store;

// Re-export commonly used types
pub use layer_loader::LayerLoader;
pub use parser::ConfigParser;
pub use secret_store::SecretStore;
