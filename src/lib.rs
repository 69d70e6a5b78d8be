//! Keygate
//!
//! Account-scoped API key management service:
//! - Keys are generated server-side and returned exactly once
//! - Every key carries a role (viewer, editor, admin)
//! - Management endpoints require an admin-role key
//! - Storage backends: in-memory (development) and PostgreSQL

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::api_key::{
    ApiKeyGenerator, ApiKeyService, InMemoryApiKeyRepository, PostgresApiKeyRepository,
    PostgresConfig,
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let generator = ApiKeyGenerator::new(&config.keys.prefix);

    info!("Storage backend: {}", config.storage.backend);

    let state = match config.storage.backend.as_str() {
        "postgres" | "postgresql" | "pg" => {
            let database_url = config
                .storage
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "postgres backend selected but no database URL configured \
                         (set storage.database_url or DATABASE_URL)"
                    )
                })?;

            let pg_config = PostgresConfig::new(database_url)
                .with_max_connections(config.storage.max_connections);

            info!("Connecting to PostgreSQL...");
            let repository = PostgresApiKeyRepository::connect(&pg_config).await?;
            repository.ensure_table().await?;
            info!("PostgreSQL connection established");

            let service = ApiKeyService::new(Arc::new(repository)).with_generator(generator);
            AppState::new(Arc::new(service))
        }
        "memory" | "inmemory" | "in-memory" | "in_memory" => {
            let repository = Arc::new(InMemoryApiKeyRepository::new());
            let service = ApiKeyService::new(repository).with_generator(generator);
            AppState::new(Arc::new(service))
        }
        other => {
            anyhow::bail!("unknown storage backend: '{}'", other);
        }
    };

    Ok(state)
}
