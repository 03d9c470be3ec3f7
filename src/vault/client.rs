//! Minimal HTTP client for the Vault API.

use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{Result, VaultError};
use super::types::KvVersion;
use crate::template::SecretMap;

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Thin wrapper over `reqwest` speaking Vault's `/v1` API.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    address: Url,
    namespace: Option<String>,
    kv_version: KvVersion,
}

impl VaultClient {
    pub fn new(
        address: &str,
        namespace: Option<String>,
        kv_version: KvVersion,
        timeout: Duration,
    ) -> Result<Self> {
        let mut address = Url::parse(address)
            .map_err(|e| VaultError::Config(format!("invalid Vault address '{address}': {e}")))?;
        // Url::join replaces the last segment unless the base ends with '/'.
        if !address.path().ends_with('/') {
            let path = format!("{}/", address.path());
            address.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            address,
            namespace,
            kv_version,
        })
    }

    pub fn address(&self) -> &Url {
        &self.address
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.address
            .join(&format!("v1/{}", path.trim_start_matches('/')))
            .map_err(|e| VaultError::Config(format!("invalid Vault path '{path}': {e}")))
    }

    fn with_namespace(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.namespace {
            Some(ns) => request.header(NAMESPACE_HEADER, ns),
            None => request,
        }
    }

    /// POST `payload` to `path` and return the JSON response body.
    pub async fn write(&self, path: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        debug!("Vault write {path}");
        let request = self.with_namespace(self.http.post(self.url(path)?).json(payload));
        let response = check_status(path, request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Read the secrets stored at `path`, unwrapping the KV v2 envelope when
    /// configured.
    pub async fn read(&self, path: &str, token: &str) -> Result<SecretMap> {
        debug!("Vault read {path} (kv v{})", self.kv_version);
        let request = self.with_namespace(self.http.get(self.url(path)?).header(TOKEN_HEADER, token));
        let response = check_status(path, request.send().await?).await?;
        let body: serde_json::Value = response.json().await?;
        extract_secrets(path, body, self.kv_version)
    }
}

async fn check_status(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(VaultError::NotFound(path.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(VaultError::Status {
        status: status.as_u16(),
        path: path.to_string(),
        message: error_message(&body),
    })
}

/// Vault reports failures as `{"errors": ["..."]}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("errors")?.as_array().map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

fn extract_secrets(path: &str, body: serde_json::Value, kv_version: KvVersion) -> Result<SecretMap> {
    let mut data = match body {
        serde_json::Value::Object(mut map) => map.remove("data"),
        _ => None,
    }
    .ok_or_else(|| VaultError::UnexpectedFormat(format!("response for {path} has no data")))?;

    if kv_version == KvVersion::V2 {
        data = match data {
            serde_json::Value::Object(mut map) => map.remove("data"),
            _ => None,
        }
        .ok_or_else(|| {
            VaultError::UnexpectedFormat(format!("KV v2 response for {path} has no data.data"))
        })?;
    }

    match data {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        // A deleted KV v2 version returns `data: null`.
        serde_json::Value::Null => Err(VaultError::NotFound(path.to_string())),
        other => Err(VaultError::UnexpectedFormat(format!(
            "data for {path} is not an object: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_keeps_base_path() {
        let client = VaultClient::new(
            "https://vault.example.com/proxy",
            None,
            KvVersion::V1,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.url("/secret/app").unwrap().as_str(),
            "https://vault.example.com/proxy/v1/secret/app"
        );
    }

    #[test]
    fn invalid_address_is_config_error() {
        let err = VaultClient::new("not a url", None, KvVersion::V1, Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, VaultError::Config(_)));
    }

    #[test]
    fn extracts_kv1_data() {
        let secrets = extract_secrets(
            "secret/app",
            json!({"data": {"pw": "s3cr3t", "port": 8080}}),
            KvVersion::V1,
        )
        .unwrap();
        assert_eq!(secrets["pw"], "s3cr3t");
        assert_eq!(secrets["port"], 8080);
    }

    #[test]
    fn extracts_kv2_data() {
        let secrets = extract_secrets(
            "secret/data/app",
            json!({"data": {"data": {"pw": "s3cr3t"}, "metadata": {"version": 3}}}),
            KvVersion::V2,
        )
        .unwrap();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets["pw"], "s3cr3t");
    }

    #[test]
    fn kv2_deleted_version_is_not_found() {
        let err = extract_secrets(
            "secret/data/app",
            json!({"data": {"data": null, "metadata": {"deletion_time": "2026-01-01T00:00:00Z"}}}),
            KvVersion::V2,
        )
        .unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[test]
    fn missing_data_is_unexpected() {
        let err = extract_secrets("secret/app", json!({"warnings": []}), KvVersion::V1).unwrap_err();
        assert!(matches!(err, VaultError::UnexpectedFormat(_)));
    }

    #[test]
    fn error_message_joins_vault_errors() {
        assert_eq!(error_message(r#"{"errors":["permission denied","x"]}"#), "permission denied; x");
        assert_eq!(error_message("upstream timeout\n"), "upstream timeout");
    }
}
