//! Keygen command - provision an API key from the command line
//!
//! Intended for bootstrapping a fresh deployment: create the first
//! admin key before any key exists to authenticate the admin API with.
//! Only meaningful against a persistent storage backend.

use clap::Args;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::api_key::{AddApiKeyCommand, KeyRole};
use crate::domain::AccountId;
use crate::infrastructure::logging;

#[derive(Args)]
pub struct KeygenArgs {
    /// Account the key belongs to
    #[arg(long)]
    pub account: i64,

    /// Display name for the key
    #[arg(long)]
    pub name: String,

    /// Role granted to the key
    #[arg(long, default_value = "admin")]
    pub role: String,
}

/// Provision a key and print the secret to stdout
pub async fn run(args: KeygenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    if config.storage.backend != "postgres" {
        warn!("Provisioning against non-persistent storage; the key dies with this process");
    }

    let role: KeyRole = args
        .role
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let state = crate::create_app_state_with_config(&config).await?;

    let created = state
        .api_key_service
        .add(AddApiKeyCommand::new(
            AccountId::new(args.account),
            args.name,
            role,
        ))
        .await?;

    // The secret is shown exactly once
    println!("{}", created.key());

    Ok(())
}
