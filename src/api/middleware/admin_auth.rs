//! Admin authentication middleware
//!
//! Key management endpoints require a key with the admin role.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::api_key::ApiKey;

use super::auth::RequireApiKey;

/// Extractor that requires an admin-role API key
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub ApiKey);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireApiKey(api_key) = RequireApiKey::from_request_parts(parts, state).await?;

        if !api_key.role().is_admin() {
            return Err(ApiError::forbidden("Admin role required"));
        }

        debug!(account_id = %api_key.account_id(), id = %api_key.id(), "Admin access via API key");
        Ok(RequireAdmin(api_key))
    }
}
