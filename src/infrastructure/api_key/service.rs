//! API Key service
//!
//! Provides high-level operations for API key management.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::api_key::{
    validate_key_name, validate_key_secret, AddApiKeyCommand, ApiKey, ApiKeyId, ApiKeyRepository,
    DeleteApiKeyCommand, GetApiKeyByKeyQuery, GetApiKeysQuery, UpdateApiKeyCommand,
};
use crate::domain::{AccountId, DomainError};

use super::generator::ApiKeyGenerator;

/// API Key service for managing account-scoped keys
#[derive(Debug)]
pub struct ApiKeyService<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: ApiKeyGenerator,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    /// Create a new API key service
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: ApiKeyGenerator::production(),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: ApiKeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Create a new API key
    ///
    /// The secret is generated here; any value in `cmd.key` is
    /// replaced. The created entity (including the secret) is returned
    /// once - callers must hand it to the requester immediately.
    pub async fn add(&self, mut cmd: AddApiKeyCommand) -> Result<ApiKey, DomainError> {
        validate_key_name(&cmd.name).map_err(|e| DomainError::validation(e.to_string()))?;

        cmd.key = self.generator.generate();

        info!(
            account_id = %cmd.account_id,
            name = %cmd.name,
            role = %cmd.role,
            "Creating API key"
        );

        let created = self.repository.add(&cmd).await?;

        info!(account_id = %cmd.account_id, id = %created.id(), "API key created");

        Ok(created)
    }

    /// Update an API key's name and role
    pub async fn update(&self, cmd: UpdateApiKeyCommand) -> Result<ApiKey, DomainError> {
        validate_key_name(&cmd.name).map_err(|e| DomainError::validation(e.to_string()))?;

        info!(account_id = %cmd.account_id, id = %cmd.id, "Updating API key");

        self.repository.update(&cmd).await
    }

    /// Delete an API key; returns true if a key was deleted
    pub async fn delete(&self, cmd: DeleteApiKeyCommand) -> Result<bool, DomainError> {
        info!(account_id = %cmd.account_id, id = %cmd.id, "Deleting API key");

        self.repository.delete(&cmd).await
    }

    /// Get an API key by id within an account
    pub async fn get(
        &self,
        account_id: AccountId,
        id: ApiKeyId,
    ) -> Result<Option<ApiKey>, DomainError> {
        self.repository.get(account_id, id).await
    }

    /// Get all keys for an account, ordered by name
    pub async fn get_keys(&self, query: GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.get_keys(&query).await
    }

    /// Get a key by its secret string
    pub async fn get_by_key(
        &self,
        query: GetApiKeyByKeyQuery,
    ) -> Result<Option<ApiKey>, DomainError> {
        self.repository.get_by_key(&query).await
    }

    /// Resolve a presented secret to a live key
    ///
    /// Any failure - malformed secret, unknown secret - collapses into
    /// the invalid-key sentinel so callers cannot distinguish the two.
    pub async fn validate(&self, presented: &str) -> Result<ApiKey, DomainError> {
        if validate_key_secret(presented).is_err() {
            debug!("Presented API key is malformed");
            return Err(DomainError::invalid_api_key());
        }

        let found = self
            .repository
            .get_by_key(&GetApiKeyByKeyQuery::new(presented))
            .await?;

        match found {
            Some(key) => {
                debug!(account_id = %key.account_id(), id = %key.id(), "API key validated");
                Ok(key)
            }
            None => {
                debug!("Presented API key does not match any stored key");
                Err(DomainError::invalid_api_key())
            }
        }
    }

    /// Count keys across all accounts
    pub async fn count_all(&self) -> Result<usize, DomainError> {
        self.repository.count_all().await
    }
}
