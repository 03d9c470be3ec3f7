//! In-memory secret store.
//!
//! Backs offline rendering (`--secrets-file`) and tests. The path prefix is
//! ignored: the whole mapping is returned for every path.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::error::{Result, VaultError};
use super::types::SecretStore;
use crate::template::SecretMap;

/// Maximum size for a secrets file (1 MB).
const MAX_SECRETS_FILE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    secrets: SecretMap,
}

impl StaticSecretStore {
    pub fn new(secrets: SecretMap) -> Self {
        Self { secrets }
    }

    /// Load a flat YAML or JSON mapping of secret name to value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        if size > MAX_SECRETS_FILE_BYTES {
            return Err(VaultError::Parse(format!(
                "'{}' is {size} bytes, exceeds limit of {MAX_SECRETS_FILE_BYTES} bytes",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        // YAML is a superset of JSON, so one parser covers both.
        let secrets: SecretMap = serde_yaml::from_str(&content)
            .map_err(|e| VaultError::Parse(format!("'{}': {e}", path.display())))?;
        debug!("Loaded {} secret(s) from {}", secrets.len(), path.display());
        Ok(Self { secrets })
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_secrets(&self, _path: &str) -> Result<SecretMap> {
        Ok(self.secrets.clone())
    }
}
