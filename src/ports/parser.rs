// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the text of a layer file
//! into a flat [`ConfigObject`].

use crate::domain::{ConfigObject, Result};

/// A trait for parsing configuration layer files.
///
/// A parser maps file content to flat key/scalar pairs. Scalars keep the type the
/// format expresses (a YAML `8080` is an integer, `"8080"` is a string); nothing is
/// coerced at this stage.
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::ConfigParser;
/// use layercfg::domain::{ConfigObject, ConfigValue, Result};
///
/// struct KeyEqualsValue;
///
/// impl ConfigParser for KeyEqualsValue {
///     fn parse(&self, content: &str) -> Result<ConfigObject> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), ConfigValue::from(v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["env"]
///     }
/// }
///
/// let parsed = KeyEqualsValue.parse("HOST=db").unwrap();
/// assert_eq!(parsed["HOST"], ConfigValue::from("db"));
/// ```
pub trait ConfigParser {
    /// Parses layer content into a flat key/scalar map.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigObject)` - The parsed layer
    /// * `Err(ConfigError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<ConfigObject>;

    /// Returns the file extensions supported by this parser, in lookup order.
    ///
    /// Extensions are given without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}
