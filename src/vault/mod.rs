//! Secret stores.
//!
//! The substitution engine consumes a single flat [`SecretMap`] per run. This
//! module produces it:
//! - **Vault AppRole**: log in with role/secret id, read with the issued token
//! - **Vault token**: read with a pre-issued token
//! - **Static**: an in-memory or file-backed mapping, for offline rendering
//!
//! [`SecretMap`]: crate::template::SecretMap

pub mod approle;
pub mod client;
pub mod error;
pub mod static_store;
pub mod token;
pub mod types;

pub use approle::AppRoleStore;
pub use client::VaultClient;
pub use error::VaultError;
pub use static_store::StaticSecretStore;
pub use token::TokenStore;
pub use types::{KvVersion, SecretStore};

use std::time::Duration;
use tracing::info;

use crate::config::{AuthMethod, VaultConfig};

/// Build the Vault-backed store described by `config`.
///
/// Expects a validated config; missing credentials are still reported as
/// [`VaultError::Config`].
pub fn build_store(config: &VaultConfig) -> error::Result<Box<dyn SecretStore>> {
    let address = config
        .address
        .as_deref()
        .ok_or_else(|| VaultError::Config("Vault address is not set".into()))?;
    let client = VaultClient::new(
        address,
        config.namespace.clone(),
        config.kv_version,
        Duration::from_secs(config.timeout_secs),
    )?;

    let missing = |field: &str| VaultError::Config(format!("vault.auth.{field} is not set"));
    let store: Box<dyn SecretStore> = match config.auth.method {
        AuthMethod::AppRole => Box::new(AppRoleStore::new(
            client,
            config.auth.role_id.clone().ok_or_else(|| missing("roleId"))?,
            config.auth.secret_id.clone().ok_or_else(|| missing("secretId"))?,
        )),
        AuthMethod::Token => Box::new(TokenStore::new(
            client,
            config.auth.token.clone().ok_or_else(|| missing("token"))?,
        )),
    };

    info!("Using {} secret store at {address}", store.name());
    Ok(store)
}
