//! API key mutation commands
//!
//! Commands are the request bodies of the management API. Serialized
//! fields are the wire contract; account scoping and server-filled
//! fields are `#[serde(skip)]` and injected by the handler layer.

use serde::{Deserialize, Serialize};

use super::entity::{ApiKeyId, KeyRole};
use crate::domain::account::AccountId;

/// Command to create a new API key
///
/// `key` is filled by the service from the generator; clients never
/// supply the secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddApiKeyCommand {
    pub name: String,
    pub role: KeyRole,

    #[serde(skip)]
    pub account_id: AccountId,
    #[serde(skip)]
    pub key: String,
}

impl AddApiKeyCommand {
    /// Create a command for the given account
    pub fn new(account_id: AccountId, name: impl Into<String>, role: KeyRole) -> Self {
        Self {
            name: name.into(),
            role,
            account_id,
            key: String::new(),
        }
    }
}

/// Command to update an existing API key (name and role only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApiKeyCommand {
    pub id: ApiKeyId,
    pub name: String,
    pub role: KeyRole,

    #[serde(skip)]
    pub account_id: AccountId,
}

/// Command to delete an API key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteApiKeyCommand {
    pub id: ApiKeyId,

    #[serde(skip)]
    pub account_id: AccountId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command_deserialization() {
        let json = r#"{"name": "CI deploy key", "role": "editor"}"#;

        let cmd: AddApiKeyCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.name, "CI deploy key");
        assert_eq!(cmd.role, KeyRole::Editor);
        // Skipped fields come back as defaults regardless of payload
        assert_eq!(cmd.account_id, AccountId::default());
        assert!(cmd.key.is_empty());
    }

    #[test]
    fn test_add_command_ignores_injected_fields() {
        // Scoping and secrets in the payload must never reach the struct
        let json = r#"{"name": "k", "role": "viewer", "account_id": 99, "key": "forged"}"#;

        let cmd: AddApiKeyCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.account_id, AccountId::default());
        assert!(cmd.key.is_empty());
    }

    #[test]
    fn test_add_command_serialization_hides_scoping() {
        let mut cmd = AddApiKeyCommand::new(AccountId::new(3), "k", KeyRole::Admin);
        cmd.key = "kg_live_secret".to_string();

        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"name\":\"k\""));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(!json.contains("account_id"));
        assert!(!json.contains("kg_live_secret"));
    }

    #[test]
    fn test_update_command_deserialization() {
        let json = r#"{"id": 12, "name": "renamed", "role": "viewer"}"#;

        let cmd: UpdateApiKeyCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.id.value(), 12);
        assert_eq!(cmd.name, "renamed");
        assert_eq!(cmd.role, KeyRole::Viewer);
        assert_eq!(cmd.account_id, AccountId::default());
    }

    #[test]
    fn test_delete_command_deserialization() {
        let json = r#"{"id": 5}"#;

        let cmd: DeleteApiKeyCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.id.value(), 5);
        assert_eq!(cmd.account_id, AccountId::default());
    }
}
