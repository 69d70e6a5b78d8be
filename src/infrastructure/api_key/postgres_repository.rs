//! PostgreSQL API key repository with connection pooling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::api_key::{
    AddApiKeyCommand, ApiKey, ApiKeyId, ApiKeyRepository, DeleteApiKeyCommand,
    GetApiKeyByKeyQuery, GetApiKeysQuery, KeyRole, UpdateApiKeyCommand,
};
use crate::domain::{AccountId, DomainError};

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/keygate".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// PostgreSQL implementation of ApiKeyRepository
///
/// Ids come from a BIGSERIAL sequence; the secret column carries a
/// unique index, which is what enforces the global uniqueness
/// invariant under concurrent inserts.
#[derive(Debug)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a repository over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with pool options from the configuration
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensures the api_keys table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id BIGSERIAL PRIMARY KEY,
                account_id BIGINT NOT NULL,
                name TEXT NOT NULL,
                key TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create api_keys table: {}", e)))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_api_keys_account ON api_keys (account_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create account index: {}", e)))?;

        Ok(())
    }

    fn row_to_api_key(row: &PgRow) -> Result<ApiKey, DomainError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Missing id column: {}", e)))?;
        let account_id: i64 = row
            .try_get("account_id")
            .map_err(|e| DomainError::storage(format!("Missing account_id column: {}", e)))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| DomainError::storage(format!("Missing name column: {}", e)))?;
        let key: String = row
            .try_get("key")
            .map_err(|e| DomainError::storage(format!("Missing key column: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::storage(format!("Missing role column: {}", e)))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Missing created_at column: {}", e)))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| DomainError::storage(format!("Missing updated_at column: {}", e)))?;

        let role: KeyRole = role
            .parse()
            .map_err(|e| DomainError::storage(format!("Invalid role column: {}", e)))?;

        Ok(ApiKey::from_storage(
            ApiKeyId::new(id),
            AccountId::new(account_id),
            name,
            key,
            role,
            created_at,
            updated_at,
        ))
    }

    fn is_unique_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == "23505")
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn add(&self, cmd: &AddApiKeyCommand) -> Result<ApiKey, DomainError> {
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO api_keys (account_id, name, key, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, account_id, name, key, role, created_at, updated_at
            "#,
        )
        .bind(cmd.account_id.value())
        .bind(&cmd.name)
        .bind(&cmd.key)
        .bind(cmd.role.to_string())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if Self::is_unique_violation(&e) {
                DomainError::conflict("API key secret already exists")
            } else {
                DomainError::storage(format!("Failed to insert API key: {}", e))
            }
        })?;

        Self::row_to_api_key(&row)
    }

    async fn update(&self, cmd: &UpdateApiKeyCommand) -> Result<ApiKey, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE api_keys
            SET name = $1, role = $2, updated_at = $3
            WHERE id = $4 AND account_id = $5
            RETURNING id, account_id, name, key, role, created_at, updated_at
            "#,
        )
        .bind(&cmd.name)
        .bind(cmd.role.to_string())
        .bind(Utc::now())
        .bind(cmd.id.value())
        .bind(cmd.account_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update API key: {}", e)))?;

        match row {
            Some(row) => Self::row_to_api_key(&row),
            None => Err(DomainError::not_found(format!(
                "API key '{}' not found",
                cmd.id
            ))),
        }
    }

    async fn delete(&self, cmd: &DeleteApiKeyCommand) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1 AND account_id = $2")
            .bind(cmd.id.value())
            .bind(cmd.account_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API key: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(
        &self,
        account_id: AccountId,
        id: ApiKeyId,
    ) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, name, key, role, created_at, updated_at
            FROM api_keys
            WHERE id = $1 AND account_id = $2
            "#,
        )
        .bind(id.value())
        .bind(account_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to fetch API key: {}", e)))?;

        row.as_ref().map(Self::row_to_api_key).transpose()
    }

    async fn get_keys(&self, query: &GetApiKeysQuery) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, name, key, role, created_at, updated_at
            FROM api_keys
            WHERE account_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(query.account_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list API keys: {}", e)))?;

        rows.iter().map(Self::row_to_api_key).collect()
    }

    async fn get_by_key(
        &self,
        query: &GetApiKeyByKeyQuery,
    ) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, name, key, role, created_at, updated_at
            FROM api_keys
            WHERE key = $1
            "#,
        )
        .bind(&query.key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to fetch API key by secret: {}", e)))?;

        row.as_ref().map(Self::row_to_api_key).transpose()
    }

    async fn count_all(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM api_keys")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count API keys: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage(format!("Missing count column: {}", e)))?;

        Ok(count as usize)
    }
}
