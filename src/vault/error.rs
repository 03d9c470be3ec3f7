/// Errors talking to a secret store.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vault returned {status} for {path}: {message}")]
    Status {
        status: u16,
        path: String,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("no secrets found at {0}")]
    NotFound(String),

    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse secrets file: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
