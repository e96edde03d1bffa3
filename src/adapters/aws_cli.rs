// SPDX-License-Identifier: MIT OR Apache-2.0

//! AWS Secrets Manager adapter driven through the `aws` command-line tool.
//!
//! Credentials, profiles and endpoints are whatever the `aws` tool resolves on its
//! own; this adapter only asks for a secret string and parses it.

use crate::domain::{parse_secret_payload, ConfigError, Result, SecretObject, SecretRequest};
use crate::ports::SecretStore;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

/// Secret store that shells out to `aws secretsmanager get-secret-value`.
///
/// The secret's `SecretString` must be a JSON object. The request timeout is passed
/// as both the connect and read timeout, in whole seconds rounded up.
///
/// # Examples
///
/// ```rust,no_run
/// use layercfg::adapters::AwsCliSecretStore;
/// use layercfg::domain::SecretSettings;
/// use layercfg::ports::SecretStore;
///
/// let store = AwsCliSecretStore::new();
/// let secret = store.fetch(&SecretSettings::default().request("prod/app")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AwsCliSecretStore {
    /// The program to run
    program: PathBuf,
}

impl AwsCliSecretStore {
    /// Creates a store that runs `aws` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("aws")
    }

    /// Creates a store that runs the given program instead of `aws`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the command line for a request.
    pub fn command(&self, request: &SecretRequest) -> Command {
        let timeout = timeout_secs(request.timeout).to_string();

        let mut command = Command::new(&self.program);
        command.args([
            "secretsmanager",
            "get-secret-value",
            "--secret-id",
            request.name.as_str(),
            "--query",
            "SecretString",
            "--output",
            "text",
            "--cli-connect-timeout",
            timeout.as_str(),
            "--cli-read-timeout",
            timeout.as_str(),
        ]);
        if let Some(region) = &request.region {
            command.args(["--region", region.as_str()]);
        }
        command
    }
}

impl Default for AwsCliSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for AwsCliSecretStore {
    fn name(&self) -> &str {
        "aws-cli"
    }

    fn fetch(&self, request: &SecretRequest) -> Result<SecretObject> {
        let output = self
            .command(request)
            .output()
            .map_err(|e| ConfigError::SecretStoreError {
                secret_name: request.name.clone(),
                message: format!("Failed to run {}", self.program.display()),
                source: Some(Box::new(e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConfigError::secret_store(
                &request.name,
                format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        let payload = String::from_utf8_lossy(&output.stdout);
        parse_secret_payload(payload.trim()).map_err(|e| ConfigError::SecretStoreError {
            secret_name: request.name.clone(),
            message: "Malformed secret value".to_string(),
            source: Some(Box::new(e)),
        })
    }
}

fn timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}
