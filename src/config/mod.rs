mod defaults;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Top-level vault-inject configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A loaded configuration and what happened while loading it.
///
/// Loading runs before the subscriber is installed, so the source and any
/// ignored overrides are kept here and logged by [`LoadedConfig::log_summary`].
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub ignored: Vec<String>,
}

impl LoadedConfig {
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!("Loaded config from {}", path.display()),
            None => info!("No config file found, using environment only"),
        }
        for reason in &self.ignored {
            warn!("{reason}");
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(path: Option<&str>) -> Result<LoadedConfig> {
        let source = path.map(PathBuf::from).or_else(find_config_file);

        let mut config = match &source {
            Some(path) => load_config_file(path)?,
            None => Config::default(),
        };

        let ignored = config.apply_env_overrides();
        Ok(LoadedConfig {
            config,
            source,
            ignored,
        })
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Returns a message for every override that was set but could not be
    /// parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut ignored = Vec::new();

        if let Some(addr) = lookup(ENV_VAULT_ADDR) {
            self.vault.address = Some(addr);
        }

        if let Some(ns) = lookup(ENV_VAULT_NAMESPACE) {
            self.vault.namespace = Some(ns);
        }

        if let Some(prefix) = lookup(ENV_VAULT_PATH_PREFIX) {
            self.vault.path_prefix = Some(prefix);
        }

        if let Some(version) = lookup(ENV_KV_VERSION) {
            match version.parse() {
                Ok(version) => self.vault.kv_version = version,
                Err(e) => ignored.push(format!("Ignoring {ENV_KV_VERSION}: {e}")),
            }
        }

        if let Some(method) = lookup(ENV_AUTH_TYPE) {
            match method.parse() {
                Ok(method) => self.vault.auth.method = method,
                Err(e) => ignored.push(format!("Ignoring {ENV_AUTH_TYPE}: {e}")),
            }
        }

        if let Some(role_id) = lookup(ENV_ROLE_ID) {
            self.vault.auth.role_id = Some(role_id);
        }

        if let Some(secret_id) = lookup(ENV_SECRET_ID) {
            self.vault.auth.secret_id = Some(secret_id);
        }

        if let Some(token) = lookup(ENV_VAULT_TOKEN) {
            self.vault.auth.token = Some(token);
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            match format.parse() {
                Ok(format) => self.logging.format = format,
                Err(e) => ignored.push(format!("Ignoring {ENV_LOG_FORMAT}: {e}")),
            }
        }

        ignored
    }

    /// Copy with credentials masked, for `config show`.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.vault.auth = self.vault.auth.redacted();
        config
    }
}

/// Find the configuration file in the working directory.
fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Load configuration from a file path.
fn load_config_file(path: &Path) -> Result<Config> {
    let value = read_config_file(path)?;
    let config = serde_json::from_value(value)?;
    Ok(config)
}
