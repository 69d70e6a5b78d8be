//! API Key entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

/// API Key identifier - assigned by the repository on creation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ApiKeyId(i64);

impl ApiKeyId {
    /// Create an ApiKeyId from its numeric value
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ApiKeyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ApiKeyId> for i64 {
    fn from(id: ApiKeyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authorization level attached to an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    /// Read-only access
    #[default]
    Viewer,
    /// Read and write access
    Editor,
    /// Full access including key management
    Admin,
}

impl KeyRole {
    /// Check if this role grants at least the privileges of another
    pub fn includes(&self, other: KeyRole) -> bool {
        self.rank() >= other.rank()
    }

    /// Check if this role may manage API keys
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Viewer => 0,
            Self::Editor => 1,
            Self::Admin => 2,
        }
    }
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Viewer => write!(f, "viewer"),
            Self::Editor => write!(f, "editor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for KeyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: '{}'", other)),
        }
    }
}

/// API Key entity
///
/// The `key` field is the secret credential itself; it must be unique
/// across all accounts. Stored entities are never exposed directly over
/// the API (see [`super::ApiKeyDTO`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier for the key
    id: ApiKeyId,
    /// Account that owns this key
    account_id: AccountId,
    /// Display name for the key
    name: String,
    /// The secret credential string
    key: String,
    /// Authorization level granted to callers presenting this key
    role: KeyRole,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Create a new API key
    pub fn new(
        id: ApiKeyId,
        account_id: AccountId,
        name: impl Into<String>,
        key: impl Into<String>,
        role: KeyRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            account_id,
            name: name.into(),
            key: key.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct an entity from storage columns
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: ApiKeyId,
        account_id: AccountId,
        name: String,
        key: String,
        role: KeyRole,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            name,
            key,
            role,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> ApiKeyId {
        self.id
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators - only name and role change after creation

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Update the role
    pub fn set_role(&mut self, role: KeyRole) {
        self.role = role;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_api_key(id: i64, name: &str) -> ApiKey {
        ApiKey::new(
            ApiKeyId::new(id),
            AccountId::new(1),
            name,
            "kg_test_secret",
            KeyRole::Viewer,
        )
    }

    #[test]
    fn test_api_key_id_value() {
        let id = ApiKeyId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_key_role_includes() {
        assert!(KeyRole::Admin.includes(KeyRole::Admin));
        assert!(KeyRole::Admin.includes(KeyRole::Editor));
        assert!(KeyRole::Admin.includes(KeyRole::Viewer));
        assert!(KeyRole::Editor.includes(KeyRole::Viewer));
        assert!(!KeyRole::Editor.includes(KeyRole::Admin));
        assert!(!KeyRole::Viewer.includes(KeyRole::Editor));
    }

    #[test]
    fn test_key_role_is_admin() {
        assert!(KeyRole::Admin.is_admin());
        assert!(!KeyRole::Editor.is_admin());
        assert!(!KeyRole::Viewer.is_admin());
    }

    #[test]
    fn test_key_role_parse() {
        assert_eq!("admin".parse::<KeyRole>().unwrap(), KeyRole::Admin);
        assert_eq!("Editor".parse::<KeyRole>().unwrap(), KeyRole::Editor);
        assert_eq!("VIEWER".parse::<KeyRole>().unwrap(), KeyRole::Viewer);
        assert!("owner".parse::<KeyRole>().is_err());
    }

    #[test]
    fn test_key_role_serialization() {
        assert_eq!(serde_json::to_string(&KeyRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<KeyRole>("\"editor\"").unwrap(),
            KeyRole::Editor
        );
    }

    #[test]
    fn test_api_key_creation() {
        let key = create_test_api_key(1, "CI deploy key");

        assert_eq!(key.id().value(), 1);
        assert_eq!(key.account_id().value(), 1);
        assert_eq!(key.name(), "CI deploy key");
        assert_eq!(key.key(), "kg_test_secret");
        assert_eq!(key.role(), KeyRole::Viewer);
        assert_eq!(key.created_at(), key.updated_at());
    }

    #[test]
    fn test_api_key_set_name_touches() {
        let mut key = create_test_api_key(1, "Old name");
        let created = key.created_at();

        key.set_name("New name");

        assert_eq!(key.name(), "New name");
        assert_eq!(key.created_at(), created);
        assert!(key.updated_at() >= created);
    }

    #[test]
    fn test_api_key_set_role() {
        let mut key = create_test_api_key(1, "Key");

        key.set_role(KeyRole::Admin);
        assert_eq!(key.role(), KeyRole::Admin);
    }
}
