//! API key lookup queries

use crate::domain::account::AccountId;

/// Query for all keys belonging to an account
///
/// Results are ordered by name ascending.
#[derive(Debug, Clone)]
pub struct GetApiKeysQuery {
    pub account_id: AccountId,
}

impl GetApiKeysQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

/// Query for a single key by its secret string
///
/// The secret is unique across all accounts, so this lookup is global.
#[derive(Debug, Clone)]
pub struct GetApiKeyByKeyQuery {
    pub key: String,
}

impl GetApiKeyByKeyQuery {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
