// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for layer precedence and secret resolution.

use layercfg::domain::SecretRequest;
use layercfg::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Shares a store with the loader so requests can be inspected afterwards
struct SharedStore(Arc<InMemorySecretStore>);

impl SecretStore for SharedStore {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn fetch(&self, request: &SecretRequest) -> Result<SecretObject> {
        self.0.fetch(request)
    }
}

fn write_layer(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

fn env(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn fetched(store: &InMemorySecretStore) -> Vec<String> {
    store.requests().into_iter().map(|r| r.name).collect()
}

fn load(dir: &TempDir, store: InMemorySecretStore, vars: &[(&str, &str)]) -> ConfigObject {
    ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(store))
        .with_env_values(env(vars))
        .build()
        .load()
}

#[test]
#[cfg(feature = "yaml")]
fn test_precedence_files_then_env() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "a: 1\n");
    write_layer(&dir, "config.production.yaml", "a: 2\nb: 1\n");
    write_layer(&dir, "config.local.yaml", "b: 2\nc: 1\n");

    let config = load(
        &dir,
        InMemorySecretStore::new(),
        &[("APP_ENV", "production"), ("c", "2")],
    );

    assert_eq!(config["a"], ConfigValue::Integer(2));
    assert_eq!(config["b"], ConfigValue::Integer(2));
    assert_eq!(config["c"], ConfigValue::Integer(2));
}

#[test]
#[cfg(feature = "yaml")]
fn test_env_local_layer_sits_between_env_and_local() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "KEY: default\nOTHER: default\n");
    write_layer(&dir, "config.staging.yaml", "KEY: staging\n");
    write_layer(&dir, "config.staging.local.yaml", "KEY: staging-local\nOTHER: staging-local\n");
    write_layer(&dir, "config.local.yaml", "OTHER: local\n");

    let config = load(&dir, InMemorySecretStore::new(), &[("NODE_ENV", "staging")]);

    assert_eq!(config["KEY"], ConfigValue::from("staging-local"));
    assert_eq!(config["OTHER"], ConfigValue::from("local"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_secrets_sit_between_files_and_env() {
    let dir = TempDir::new().unwrap();
    write_layer(
        &dir,
        "config.default.yaml",
        "AWS_SECRETS_MANAGER_NAME: app\nDB_HOST: localhost\nDB_PORT: 5432\nDEBUG: false\n",
    );
    let store = InMemorySecretStore::new()
        .with_secret("app", [("DB_HOST", "db.internal"), ("DB_PORT", "6432")]);

    let config = load(&dir, store, &[("DB_PORT", "7000"), ("DEBUG", "TRUE")]);

    assert_eq!(config["DB_HOST"], ConfigValue::from("db.internal"));
    assert_eq!(config["DB_PORT"], ConfigValue::Integer(7000));
    assert_eq!(config["DEBUG"], ConfigValue::Bool(true));
}

#[test]
#[cfg(feature = "yaml")]
fn test_secret_names_fetched_once_in_order() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "AWS_SECRETS_MANAGER_NAME: foo\n");
    let store = Arc::new(
        InMemorySecretStore::new()
            .with_secret("foo", [("FOO", "1")])
            .with_secret("bar", [("BAR", "2")]),
    );

    let config = ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(SharedStore(Arc::clone(&store))))
        .with_env_values(env(&[("AWS_SECRETS_MANAGER_NAMES", "foo, bar ,bar")]))
        .build()
        .load();

    assert_eq!(fetched(&store), ["foo", "bar"]);
    assert_eq!(config["FOO"], ConfigValue::Integer(1));
    assert_eq!(config["BAR"], ConfigValue::Integer(2));
}

#[test]
fn test_failed_secret_is_absorbed() {
    let mut defaults = ConfigObject::new();
    defaults.insert(
        "AWS_SECRETS_MANAGER_NAMES".to_string(),
        ConfigValue::from("good,bad"),
    );
    defaults.insert("PLAIN".to_string(), ConfigValue::from("value"));
    let store = Arc::new(
        InMemorySecretStore::new()
            .with_secret("good", [("TOKEN", "abc")])
            .with_failing_secret("bad"),
    );

    let config = ConfigLoader::builder()
        .with_layer_loader(Box::new(
            InMemoryLayerLoader::new().with_layer("config.default", defaults),
        ))
        .with_secret_store(Box::new(SharedStore(Arc::clone(&store))))
        .with_env_values(HashMap::new())
        .build()
        .load();

    assert_eq!(fetched(&store), ["good", "bad"]);
    assert_eq!(config["TOKEN"], ConfigValue::from("abc"));
    assert_eq!(config["PLAIN"], ConfigValue::from("value"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_region_and_timeout_from_env_override_files() {
    let dir = TempDir::new().unwrap();
    write_layer(
        &dir,
        "config.default.yaml",
        "AWS_SECRETS_MANAGER_NAME: app\nAWS_SECRETS_MANAGER_REGION: us-east-1\nAWS_SECRETS_MANAGER_TIMEOUT: 2000\n",
    );
    let store = Arc::new(InMemorySecretStore::new().with_secret("app", [("K", "v")]));

    ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(SharedStore(Arc::clone(&store))))
        .with_env_values(env(&[("AWS_SECRETS_MANAGER_REGION", "eu-central-1")]))
        .build()
        .load();

    let requests = store.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].region.as_deref(), Some("eu-central-1"));
    assert_eq!(requests[0].timeout.as_millis(), 2000);
}

#[test]
#[cfg(feature = "yaml")]
fn test_camel_case_secret_settings() {
    let dir = TempDir::new().unwrap();
    write_layer(
        &dir,
        "config.default.yaml",
        "awsSecretsManagerName: camel\nawsSecretsManagerRegion: ap-south-1\n",
    );
    let store = Arc::new(InMemorySecretStore::new().with_secret("camel", [("FROM", "camel")]));

    let config = ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(SharedStore(Arc::clone(&store))))
        .with_env_values(HashMap::new())
        .build()
        .load();

    assert_eq!(fetched(&store), ["camel"]);
    assert_eq!(store.requests()[0].region.as_deref(), Some("ap-south-1"));
    assert_eq!(config["FROM"], ConfigValue::from("camel"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_load_is_repeatable() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "AWS_SECRETS_MANAGER_NAME: app\nA: 1\n");
    let store = InMemorySecretStore::new().with_secret("app", [("B", "2.5")]);

    let loader = ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(store))
        .with_env_values(env(&[("C", "true")]))
        .build();

    let first = loader.load();
    let second = loader.load();

    assert_eq!(first, second);
    assert_eq!(first["B"], ConfigValue::Float(2.5));
}

#[test]
#[cfg(feature = "yaml")]
fn test_each_load_reads_files_afresh() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "A: before\n");
    let loader = ConfigLoader::builder()
        .base_dir(dir.path())
        .with_secret_store(Box::new(InMemorySecretStore::new()))
        .with_env_values(HashMap::new())
        .build();

    assert_eq!(loader.load()["A"], ConfigValue::from("before"));

    write_layer(&dir, "config.default.yaml", "A: after\n");
    assert_eq!(loader.load()["A"], ConfigValue::from("after"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_validation_does_not_block_production() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "x: \"\"\ny: \" padded \"\nz: undefined\n");

    let config = load(&dir, InMemorySecretStore::new(), &[("APP_ENV", "production")]);

    assert_eq!(config["x"], ConfigValue::from(""));
    assert_eq!(config["y"], ConfigValue::from(" padded "));
    assert_eq!(config["z"], ConfigValue::from("undefined"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_broken_layer_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.default.yaml", "A: 1\n");
    write_layer(&dir, "config.development.yaml", "A: [unclosed\n");
    write_layer(&dir, "config.local.yaml", "B: 2\n");

    let config = load(&dir, InMemorySecretStore::new(), &[]);

    assert_eq!(config["A"], ConfigValue::Integer(1));
    assert_eq!(config["B"], ConfigValue::Integer(2));
}

#[test]
#[cfg(feature = "yaml")]
fn test_default_section_and_config_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config").join("config.default.yml"),
        "default:\n  PORT: 8080\n  HOST: 0.0.0.0\n",
    )
    .unwrap();

    let config = ConfigLoader::builder()
        .base_dir(dir.path())
        .config_path("config")
        .with_secret_store(Box::new(InMemorySecretStore::new()))
        .with_env_values(HashMap::new())
        .build()
        .load();

    assert_eq!(config["PORT"], ConfigValue::Integer(8080));
    assert_eq!(config["HOST"], ConfigValue::from("0.0.0.0"));
    assert!(!config.contains_key("default"));
}

#[test]
#[cfg(feature = "yaml")]
fn test_json_layer_file() {
    let dir = TempDir::new().unwrap();
    write_layer(&dir, "config.test.json", r#"{"FEATURE": true, "RATIO": 0.5}"#);

    let config = load(&dir, InMemorySecretStore::new(), &[("APP_ENV", "test")]);

    assert_eq!(config["FEATURE"], ConfigValue::Bool(true));
    assert_eq!(config["RATIO"], ConfigValue::Float(0.5));
}

#[test]
fn test_empty_sources_yield_env_only() {
    let config = ConfigLoader::builder()
        .with_layer_loader(Box::new(InMemoryLayerLoader::new()))
        .with_secret_store(Box::new(InMemorySecretStore::new()))
        .with_env_values(env(&[("ONLY", "env")]))
        .build()
        .load();

    assert_eq!(config.len(), 1);
    assert_eq!(config["ONLY"], ConfigValue::from("env"));
}
