use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tracing::info;
use vault_inject::cli::{Cli, Commands, ConfigAction, GenerateOpts};
use vault_inject::config::{validate_config_object, write_config_file, Config, CONFIG_FILE_CANDIDATES};
use vault_inject::vault::{self, SecretStore, StaticSecretStore};
use vault_inject::{logging, manifest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(opts) => {
            let config = load_config(opts.config.as_deref())?;
            generate(config, opts).await?;
        }
        Commands::Config(opts) => {
            let config = load_config(opts.config.as_deref())?;
            match opts.action {
                ConfigAction::Show => {
                    println!("{}", serde_yaml::to_string(&config.redacted())?);
                }
                ConfigAction::Validate => {
                    validate_config_object(&config)?;
                    info!("Configuration is valid");
                }
                ConfigAction::Init => {
                    let path = opts.config.as_deref().unwrap_or(CONFIG_FILE_CANDIDATES[0]);
                    write_config_file(Path::new(path), &Config::default())?;
                    info!("Configuration file created at {path}");
                }
            }
        }
        Commands::Version => {
            println!("vault-inject {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load configuration, install the subscriber, then report how loading went.
fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let loaded = Config::load(path)?;
    logging::init(&loaded.config.logging);
    loaded.log_summary();
    Ok(loaded.config)
}

async fn generate(mut config: Config, opts: GenerateOpts) -> anyhow::Result<()> {
    if let Some(prefix) = opts.path_prefix {
        config.vault.path_prefix = Some(prefix);
    }

    let mut store: Box<dyn SecretStore> = match &opts.secrets_file {
        Some(file) => Box::new(
            StaticSecretStore::from_file(file)
                .with_context(|| format!("Failed to load secrets file '{}'", file.display()))?,
        ),
        None => {
            validate_config_object(&config)?;
            vault::build_store(&config.vault)?
        }
    };

    let path_prefix = config.vault.path_prefix.clone().unwrap_or_default();
    let output = manifest::generate(&opts.path, store.as_mut(), &path_prefix).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
