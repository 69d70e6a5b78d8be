//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{
    AddApiKeyCommand, ApiKey, ApiKeyId, ApiKeyRepository, DeleteApiKeyCommand,
    GetApiKeyByKeyQuery, GetApiKeysQuery, UpdateApiKeyCommand,
};
use crate::domain::{AccountId, DomainError};

/// In-memory implementation of ApiKeyRepository
///
/// Keys are held in a map by id with a secondary index on the secret
/// string. Ids come from an atomic sequence. Data is lost when the
/// process terminates; intended for tests and development.
#[derive(Debug)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<i64, ApiKey>>>,
    key_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(HashMap::new())),
            key_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryApiKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn add(&self, cmd: &AddApiKeyCommand) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;
        let mut key_index = self.key_index.write().await;

        if key_index.contains_key(&cmd.key) {
            return Err(DomainError::conflict("API key secret already exists"));
        }

        let id = ApiKeyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let api_key = ApiKey::new(id, cmd.account_id, &cmd.name, &cmd.key, cmd.role);

        keys.insert(id.value(), api_key.clone());
        key_index.insert(cmd.key.clone(), id.value());

        Ok(api_key)
    }

    async fn update(&self, cmd: &UpdateApiKeyCommand) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;

        match keys.get_mut(&cmd.id.value()) {
            Some(key) if key.account_id() == cmd.account_id => {
                key.set_name(&cmd.name);
                key.set_role(cmd.role);
                Ok(key.clone())
            }
            _ => Err(DomainError::not_found(format!(
                "API key '{}' not found",
                cmd.id
            ))),
        }
    }

    async fn delete(&self, cmd: &DeleteApiKeyCommand) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        let mut key_index = self.key_index.write().await;

        let owned = keys
            .get(&cmd.id.value())
            .is_some_and(|k| k.account_id() == cmd.account_id);

        if !owned {
            return Ok(false);
        }

        if let Some(key) = keys.remove(&cmd.id.value()) {
            key_index.remove(key.key());
        }

        Ok(true)
    }

    async fn get(
        &self,
        account_id: AccountId,
        id: ApiKeyId,
    ) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        Ok(keys
            .get(&id.value())
            .filter(|k| k.account_id() == account_id)
            .cloned())
    }

    async fn get_keys(&self, query: &GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        let mut result: Vec<ApiKey> = keys
            .values()
            .filter(|k| k.account_id() == query.account_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(result)
    }

    async fn get_by_key(
        &self,
        query: &GetApiKeyByKeyQuery,
    ) -> Result<Option<ApiKey>, DomainError> {
        let key_index = self.key_index.read().await;

        if let Some(id) = key_index.get(&query.key) {
            let keys = self.keys.read().await;
            Ok(keys.get(id).cloned())
        } else {
            Ok(None)
        }
    }

    async fn count_all(&self) -> Result<usize, DomainError> {
        Ok(self.keys.read().await.len())
    }
}
