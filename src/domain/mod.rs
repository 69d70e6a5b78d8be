//! Domain layer - Core business logic and entities

pub mod account;
pub mod api_key;
pub mod error;

pub use account::AccountId;
pub use api_key::{
    AddApiKeyCommand, ApiKey, ApiKeyDTO, ApiKeyId, ApiKeyRepository, ApiKeyValidationError,
    DeleteApiKeyCommand, GetApiKeyByKeyQuery, GetApiKeysQuery, KeyRole, UpdateApiKeyCommand,
};
pub use error::DomainError;
