//! Vault AppRole authentication.

use async_trait::async_trait;
use tracing::info;

use super::client::VaultClient;
use super::error::{Result, VaultError};
use super::types::SecretStore;
use crate::template::SecretMap;

const LOGIN_PATH: &str = "auth/approle/login";

/// Reads secrets with a token obtained through the AppRole login flow.
pub struct AppRoleStore {
    client: VaultClient,
    role_id: String,
    secret_id: String,
    token: Option<String>,
}

impl AppRoleStore {
    pub fn new(client: VaultClient, role_id: String, secret_id: String) -> Self {
        Self {
            client,
            role_id,
            secret_id,
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl SecretStore for AppRoleStore {
    fn name(&self) -> &str {
        "vault-approle"
    }

    async fn login(&mut self) -> Result<()> {
        let payload = serde_json::json!({
            "role_id": self.role_id,
            "secret_id": self.secret_id,
        });

        let response = self.client.write(LOGIN_PATH, &payload).await.map_err(|e| match e {
            VaultError::Status { status, message, .. } => {
                VaultError::Auth(format!("AppRole login rejected ({status}): {message}"))
            }
            other => other,
        })?;

        let token = response
            .pointer("/auth/client_token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                VaultError::UnexpectedFormat("login response has no auth.client_token".into())
            })?;

        self.token = Some(token.to_string());
        info!("Authenticated to Vault at {} with AppRole", self.client.address());
        Ok(())
    }

    async fn get_secrets(&self, path: &str) -> Result<SecretMap> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| VaultError::Auth("AppRole store used before login".into()))?;
        self.client.read(path, token).await
    }
}
