// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret store trait definition.

use crate::domain::{Result, SecretObject, SecretRequest};

/// A trait for fetching named secrets from a managed store.
///
/// A fetch returns the secret's raw key/value strings. Any failure (network,
/// authorization, a malformed payload) is reported as an error; the resolver logs it
/// and carries on without that secret's keys.
///
/// Fetches are issued one at a time, in order, each bounded by
/// [`SecretRequest::timeout`].
///
/// # Examples
///
/// ```rust
/// use layercfg::ports::SecretStore;
/// use layercfg::domain::{ConfigError, Result, SecretObject, SecretRequest};
///
/// struct Unreachable;
///
/// impl SecretStore for Unreachable {
///     fn name(&self) -> &str {
///         "unreachable"
///     }
///
///     fn fetch(&self, request: &SecretRequest) -> Result<SecretObject> {
///         Err(ConfigError::secret_store(&request.name, "connection refused"))
///     }
/// }
/// ```
pub trait SecretStore: Send + Sync {
    /// Returns a short name for this store, used in log messages.
    fn name(&self) -> &str;

    /// Fetches one secret.
    fn fetch(&self, request: &SecretRequest) -> Result<SecretObject>;
}
