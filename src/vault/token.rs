//! Vault static token authentication.

use async_trait::async_trait;

use super::client::VaultClient;
use super::error::Result;
use super::types::SecretStore;
use crate::template::SecretMap;

/// Reads secrets with a pre-issued Vault token (`VAULT_TOKEN`).
pub struct TokenStore {
    client: VaultClient,
    token: String,
}

impl TokenStore {
    pub fn new(client: VaultClient, token: String) -> Self {
        Self { client, token }
    }
}

#[async_trait]
impl SecretStore for TokenStore {
    fn name(&self) -> &str {
        "vault-token"
    }

    async fn get_secrets(&self, path: &str) -> Result<SecretMap> {
        self.client.read(path, &self.token).await
    }
}
