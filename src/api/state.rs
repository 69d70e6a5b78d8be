//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::{
    AddApiKeyCommand, ApiKey, ApiKeyId, ApiKeyRepository, DeleteApiKeyCommand,
    GetApiKeyByKeyQuery, GetApiKeysQuery, UpdateApiKeyCommand,
};
use crate::domain::{AccountId, DomainError};
use crate::infrastructure::api_key::ApiKeyService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
}

impl AppState {
    /// Create new application state with the provided service
    pub fn new(api_key_service: Arc<dyn ApiKeyServiceTrait>) -> Self {
        Self { api_key_service }
    }
}

/// Trait for API key service operations
///
/// Erases the repository generic so handlers see a single service type.
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn validate(&self, key: &str) -> Result<ApiKey, DomainError>;
    async fn add(&self, cmd: AddApiKeyCommand) -> Result<ApiKey, DomainError>;
    async fn update(&self, cmd: UpdateApiKeyCommand) -> Result<ApiKey, DomainError>;
    async fn delete(&self, cmd: DeleteApiKeyCommand) -> Result<bool, DomainError>;
    async fn get(&self, account_id: AccountId, id: ApiKeyId)
        -> Result<Option<ApiKey>, DomainError>;
    async fn get_keys(&self, query: GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError>;
    async fn get_by_key(&self, query: GetApiKeyByKeyQuery)
        -> Result<Option<ApiKey>, DomainError>;
    async fn count_all(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyServiceTrait for ApiKeyService<R> {
    async fn validate(&self, key: &str) -> Result<ApiKey, DomainError> {
        ApiKeyService::validate(self, key).await
    }

    async fn add(&self, cmd: AddApiKeyCommand) -> Result<ApiKey, DomainError> {
        ApiKeyService::add(self, cmd).await
    }

    async fn update(&self, cmd: UpdateApiKeyCommand) -> Result<ApiKey, DomainError> {
        ApiKeyService::update(self, cmd).await
    }

    async fn delete(&self, cmd: DeleteApiKeyCommand) -> Result<bool, DomainError> {
        ApiKeyService::delete(self, cmd).await
    }

    async fn get(
        &self,
        account_id: AccountId,
        id: ApiKeyId,
    ) -> Result<Option<ApiKey>, DomainError> {
        ApiKeyService::get(self, account_id, id).await
    }

    async fn get_keys(&self, query: GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError> {
        ApiKeyService::get_keys(self, query).await
    }

    async fn get_by_key(
        &self,
        query: GetApiKeyByKeyQuery,
    ) -> Result<Option<ApiKey>, DomainError> {
        ApiKeyService::get_by_key(self, query).await
    }

    async fn count_all(&self) -> Result<usize, DomainError> {
        ApiKeyService::count_all(self).await
    }
}
