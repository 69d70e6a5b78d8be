//! API Key repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::commands::{AddApiKeyCommand, DeleteApiKeyCommand, UpdateApiKeyCommand};
use super::entity::{ApiKey, ApiKeyId};
use super::queries::{GetApiKeyByKeyQuery, GetApiKeysQuery};
use crate::domain::account::AccountId;
use crate::domain::DomainError;

/// Repository trait for API key storage
///
/// Implementations assign numeric identifiers on creation and enforce
/// the global uniqueness of the secret string.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Create a new API key from a fully populated command
    async fn add(&self, cmd: &AddApiKeyCommand) -> Result<ApiKey, DomainError>;

    /// Update an existing key's name and role, scoped to the account
    async fn update(&self, cmd: &UpdateApiKeyCommand) -> Result<ApiKey, DomainError>;

    /// Delete a key, scoped to the account; returns true if deleted
    async fn delete(&self, cmd: &DeleteApiKeyCommand) -> Result<bool, DomainError>;

    /// Get a key by id, scoped to the account
    async fn get(&self, account_id: AccountId, id: ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Get all keys for an account, ordered by name ascending
    async fn get_keys(&self, query: &GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError>;

    /// Get a key by its secret string (global lookup)
    async fn get_by_key(&self, query: &GetApiKeyByKeyQuery)
        -> Result<Option<ApiKey>, DomainError>;

    /// Count keys across all accounts (liveness probe support)
    async fn count_all(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::api_key::KeyRole;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock API key repository for testing error paths
    #[derive(Debug, Default)]
    pub struct MockApiKeyRepository {
        keys: Arc<RwLock<HashMap<i64, ApiKey>>>,
        next_id: AtomicI64,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockApiKeyRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self {
                keys: Arc::new(RwLock::new(HashMap::new())),
                next_id: AtomicI64::new(1),
                should_fail: Arc::new(RwLock::new(false)),
            }
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ApiKeyRepository for MockApiKeyRepository {
        async fn add(&self, cmd: &AddApiKeyCommand) -> Result<ApiKey, DomainError> {
            self.check_should_fail().await?;
            let mut keys = self.keys.write().await;

            if keys.values().any(|k| k.key() == cmd.key) {
                return Err(DomainError::conflict("API key secret already exists"));
            }

            let id = ApiKeyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let api_key = ApiKey::new(id, cmd.account_id, &cmd.name, &cmd.key, cmd.role);
            keys.insert(id.value(), api_key.clone());
            Ok(api_key)
        }

        async fn update(&self, cmd: &UpdateApiKeyCommand) -> Result<ApiKey, DomainError> {
            self.check_should_fail().await?;
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
            self.check_should_fail().await?;
            let mut keys = self.keys.write().await;

            match keys.get(&cmd.id.value()) {
                Some(key) if key.account_id() == cmd.account_id => {
                    keys.remove(&cmd.id.value());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn get(
            &self,
            account_id: AccountId,
            id: ApiKeyId,
        ) -> Result<Option<ApiKey>, DomainError> {
            self.check_should_fail().await?;
            let keys = self.keys.read().await;

            Ok(keys
                .get(&id.value())
                .filter(|k| k.account_id() == account_id)
                .cloned())
        }

        async fn get_keys(&self, query: &GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError> {
            self.check_should_fail().await?;
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
            self.check_should_fail().await?;
            let keys = self.keys.read().await;
            Ok(keys.values().find(|k| k.key() == query.key).cloned())
        }

        async fn count_all(&self) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            Ok(self.keys.read().await.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn add_command(account: i64, name: &str, key: &str) -> AddApiKeyCommand {
            let mut cmd = AddApiKeyCommand::new(AccountId::new(account), name, KeyRole::Viewer);
            cmd.key = key.to_string();
            cmd
        }

        #[tokio::test]
        async fn test_add_and_get() {
            let repo = MockApiKeyRepository::new();

            let created = repo.add(&add_command(1, "Key", "kg_test_a")).await.unwrap();

            let fetched = repo.get(AccountId::new(1), created.id()).await.unwrap();
            assert!(fetched.is_some());
            assert_eq!(fetched.unwrap().name(), "Key");
        }

        #[tokio::test]
        async fn test_get_wrong_account() {
            let repo = MockApiKeyRepository::new();

            let created = repo.add(&add_command(1, "Key", "kg_test_a")).await.unwrap();

            let fetched = repo.get(AccountId::new(2), created.id()).await.unwrap();
            assert!(fetched.is_none());
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockApiKeyRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.add(&add_command(1, "Key", "kg_test_a")).await;
            assert!(result.is_err());
        }
    }
}
