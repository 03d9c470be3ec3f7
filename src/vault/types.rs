//! Core types for secret stores.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{Result, VaultError};
use crate::template::SecretMap;

/// Source of the secret mapping injected into manifests.
///
/// Implementations authenticate once with [`SecretStore::login`] and then
/// return every secret stored under a path prefix as a flat mapping.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Display name for logging.
    fn name(&self) -> &str;

    /// Authenticate against the store.
    async fn login(&mut self) -> Result<()> {
        Ok(())
    }

    /// Fetch all secrets under `path`.
    async fn get_secrets(&self, path: &str) -> Result<SecretMap>;
}

/// Version of the Vault KV secrets engine mounted at the path prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum KvVersion {
    #[default]
    V1,
    V2,
}

impl TryFrom<u8> for KvVersion {
    type Error = VaultError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(KvVersion::V1),
            2 => Ok(KvVersion::V2),
            other => Err(VaultError::Config(format!(
                "unsupported KV version {other}, expected 1 or 2"
            ))),
        }
    }
}

impl From<KvVersion> for u8 {
    fn from(value: KvVersion) -> Self {
        match value {
            KvVersion::V1 => 1,
            KvVersion::V2 => 2,
        }
    }
}

impl FromStr for KvVersion {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        let version = s
            .trim()
            .trim_start_matches(|c: char| c == 'v' || c == 'V')
            .parse::<u8>()
            .map_err(|_| VaultError::Config(format!("invalid KV version '{s}'")))?;
        KvVersion::try_from(version)
    }
}

impl fmt::Display for KvVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_version_parses_env_forms() {
        assert_eq!("1".parse::<KvVersion>().unwrap(), KvVersion::V1);
        assert_eq!("v2".parse::<KvVersion>().unwrap(), KvVersion::V2);
        assert!("3".parse::<KvVersion>().is_err());
        assert!("two".parse::<KvVersion>().is_err());
    }

    #[test]
    fn kv_version_serializes_as_number() {
        assert_eq!(serde_json::to_string(&KvVersion::V2).unwrap(), "2");
        let parsed: KvVersion = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, KvVersion::V1);
        assert!(serde_json::from_str::<KvVersion>("7").is_err());
    }
}
