//! API Key validation utilities

use thiserror::Error;

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("API key name cannot be empty")]
    EmptyName,

    #[error("API key name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("API key name contains control characters")]
    ControlCharacter,

    #[error("API key secret is malformed")]
    MalformedSecret,
}

const MAX_KEY_NAME_LENGTH: usize = 100;

/// Minimum length of a plausible secret, prefix included
const MIN_SECRET_LENGTH: usize = 16;

/// Validate an API key display name
///
/// Rules:
/// - Cannot be empty (or whitespace only)
/// - Maximum 100 characters
/// - No control characters
pub fn validate_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_KEY_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_KEY_NAME_LENGTH));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(ApiKeyValidationError::ControlCharacter);
    }

    Ok(())
}

/// Validate the shape of a presented secret before any lookup
///
/// The secret is an opaque token; this only rejects values that cannot
/// possibly match a generated key.
pub fn validate_key_secret(secret: &str) -> Result<(), ApiKeyValidationError> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(ApiKeyValidationError::MalformedSecret);
    }

    if !secret.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ApiKeyValidationError::MalformedSecret);
    }

    Ok(())
}
