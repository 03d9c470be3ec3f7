use super::types::AuthMethod;
use super::Config;
use anyhow::Result;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn error(path: &str, message: &str) -> ConfigValidationError {
    ConfigValidationError {
        path: path.to_string(),
        message: message.to_string(),
    }
}

/// Validate the Vault connection settings.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    let vault = &config.vault;

    match vault.address.as_deref() {
        None => errors.push(error("vault.address", "Vault address is required (VAULT_ADDR)")),
        Some(addr) => match url::Url::parse(addr) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(error(
                "vault.address",
                &format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => errors.push(error("vault.address", &format!("Invalid URL: {e}"))),
        },
    }

    if vault.path_prefix.as_deref().map_or(true, |p| p.trim().is_empty()) {
        errors.push(error(
            "vault.pathPrefix",
            "Secret path prefix is required (VAULT_PATH_PREFIX)",
        ));
    }

    if vault.timeout_secs == 0 {
        errors.push(error("vault.timeoutSecs", "Timeout must be greater than 0"));
    }

    match vault.auth.method {
        AuthMethod::AppRole => {
            if vault.auth.role_id.is_none() {
                errors.push(error("vault.auth.roleId", "AppRole auth requires a role id (AVP_ROLE_ID)"));
            }
            if vault.auth.secret_id.is_none() {
                errors.push(error(
                    "vault.auth.secretId",
                    "AppRole auth requires a secret id (AVP_SECRET_ID)",
                ));
            }
        }
        AuthMethod::Token => {
            if vault.auth.token.is_none() {
                errors.push(error("vault.auth.token", "Token auth requires a token (VAULT_TOKEN)"));
            }
        }
    }

    errors
}

/// Validate configuration and return Result.
pub fn validate_config_object(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Configuration validation failed:\n{}", messages.join("\n"));
    }
}
