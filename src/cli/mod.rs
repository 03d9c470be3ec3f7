use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vault-inject", version, about = "Inject Vault secrets into Kubernetes manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render manifests with every <placeholder> resolved.
    Generate(GenerateOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args)]
pub struct GenerateOpts {
    /// Manifest file, directory of manifests, or `-` for stdin.
    pub path: PathBuf,
    #[arg(short, long)]
    pub config: Option<String>,
    /// Read secrets from a flat YAML/JSON file instead of Vault.
    #[arg(short, long)]
    pub secrets_file: Option<PathBuf>,
    /// Override the Vault path prefix.
    #[arg(short, long, env = "VAULT_PATH_PREFIX")]
    pub path_prefix: Option<String>,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}
