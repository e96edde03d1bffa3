// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layer loader trait definition.
//!
//! This module defines the `LayerLoader` trait, the port through which named
//! configuration layers (`config.default`, `config.production`, ...) are obtained.
//! How a name maps to content is entirely up to the implementation.

use crate::domain::{ConfigObject, Result};

/// A trait for loading named configuration layers.
///
/// # Contract
///
/// * `Ok(Some(layer))` - the layer exists and was read
/// * `Ok(None)` - no such layer; this is not an error
/// * `Err(_)` - the layer exists but could not be read or parsed
///
/// Callers treat an error exactly like an absent layer after logging it.
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::LayerLoader;
/// use layercfg::domain::{ConfigObject, ConfigValue, Result};
///
/// struct OnlyDefaults;
///
/// impl LayerLoader for OnlyDefaults {
///     fn name(&self) -> &str {
///         "only-defaults"
///     }
///
///     fn load(&self, layer: &str) -> Result<Option<ConfigObject>> {
///         if layer != "config.default" {
///             return Ok(None);
///         }
///         let mut values = ConfigObject::new();
///         values.insert("PORT".into(), ConfigValue::from(8080));
///         Ok(Some(values))
///     }
/// }
///
/// assert!(OnlyDefaults.load("config.local").unwrap().is_none());
/// ```
pub trait LayerLoader: Send + Sync {
    /// Returns a short name for this loader, used in log messages.
    fn name(&self) -> &str;

    /// Loads the layer with the given logical name.
    fn load(&self, layer: &str) -> Result<Option<ConfigObject>>;
}
