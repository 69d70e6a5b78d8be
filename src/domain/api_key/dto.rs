//! External projection of the API key entity

use serde::{Deserialize, Serialize};

use super::entity::{ApiKey, ApiKeyId, KeyRole};

/// Projection of [`ApiKey`] for external exposure
///
/// Omits timestamps and the owning account identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyDTO {
    pub id: ApiKeyId,
    pub name: String,
    pub key: String,
    pub role: KeyRole,
}

impl From<&ApiKey> for ApiKeyDTO {
    fn from(api_key: &ApiKey) -> Self {
        Self {
            id: api_key.id(),
            name: api_key.name().to_string(),
            key: api_key.key().to_string(),
            role: api_key.role(),
        }
    }
}
