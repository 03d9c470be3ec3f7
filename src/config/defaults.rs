/// Default configuration constants used across the system.

/// Default Vault request timeout in seconds.
pub const DEFAULT_VAULT_TIMEOUT_SECS: u64 = 30;

/// Default log filter directive.
pub const DEFAULT_LOG_DIRECTIVE: &str = "vault_inject=info";

/// Config file names searched in the working directory.
pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
    "vault-inject.yaml",
    "vault-inject.yml",
    "vault-inject.json",
];

// Environment variables read by `Config::apply_env_overrides`.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";
pub const ENV_VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
pub const ENV_VAULT_TOKEN: &str = "VAULT_TOKEN";
pub const ENV_VAULT_PATH_PREFIX: &str = "VAULT_PATH_PREFIX";
pub const ENV_AUTH_TYPE: &str = "AVP_AUTH_TYPE";
pub const ENV_ROLE_ID: &str = "AVP_ROLE_ID";
pub const ENV_SECRET_ID: &str = "AVP_SECRET_ID";
pub const ENV_KV_VERSION: &str = "AVP_KV_VERSION";
pub const ENV_LOG_FORMAT: &str = "AVP_LOG_FORMAT";
