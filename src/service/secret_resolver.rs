// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret resolution.
//!
//! Gathers the secret names configured across two layers, fetches each unique name
//! once, merges the results and coerces every value.

use crate::domain::{coerce_all, ConfigObject, SecretObject, SecretSettings};
use crate::ports::SecretStore;

/// Resolves secrets through a [`SecretStore`].
///
/// # Examples
///
/// ```rust
/// use layercfg::adapters::InMemorySecretStore;
/// use layercfg::domain::{ConfigObject, ConfigValue};
/// use layercfg::service::SecretResolver;
///
/// let store = InMemorySecretStore::new().with_secret("app", [("DB_PORT", "5432")]);
///
/// let mut base = ConfigObject::new();
/// base.insert("AWS_SECRETS_MANAGER_NAME".into(), ConfigValue::from("app"));
///
/// let secrets = SecretResolver::new(&store).resolve(&base, &ConfigObject::new());
/// assert_eq!(secrets["DB_PORT"], ConfigValue::Integer(5432));
/// ```
pub struct SecretResolver<'a> {
    store: &'a dyn SecretStore,
}

impl<'a> SecretResolver<'a> {
    /// Creates a resolver over the given store.
    pub fn new(store: &'a dyn SecretStore) -> Self {
        Self { store }
    }

    /// Resolves secrets named in `overrides` or, field by field, in `base`.
    ///
    /// Never fails. A secret that cannot be fetched is logged and contributes no
    /// keys; when two secrets share a key the one fetched later wins.
    pub fn resolve(&self, base: &ConfigObject, overrides: &ConfigObject) -> ConfigObject {
        let settings =
            SecretSettings::from_config(overrides).or(SecretSettings::from_config(base));
        self.resolve_settings(&settings)
    }

    /// Resolves secrets for already-combined settings.
    pub fn resolve_settings(&self, settings: &SecretSettings) -> ConfigObject {
        let names = settings.secret_names();
        if names.is_empty() {
            return ConfigObject::new();
        }

        tracing::debug!(
            "Resolving {} secret(s) from '{}' (region={:?}, timeout={:?})",
            names.len(),
            self.store.name(),
            settings.region,
            settings.timeout()
        );

        let mut merged = SecretObject::new();
        for name in &names {
            let request = settings.request(name);
            match self.store.fetch(&request) {
                Ok(secret) => {
                    tracing::debug!("Fetched {} key(s) from secret '{}'", secret.len(), name);
                    merged.extend(secret);
                }
                Err(e) => {
                    tracing::error!(
                        "Unable to get secret '{}' (region={:?}, timeout={:?}): {}",
                        name,
                        request.region,
                        request.timeout,
                        e
                    );
                }
            }
        }

        coerce_all(merged)
    }
}
