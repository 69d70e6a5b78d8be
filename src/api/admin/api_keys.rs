//! API key management endpoints

use axum::extract::{Path, State};
use serde::Serialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::api_key::{
    AddApiKeyCommand, ApiKeyDTO, ApiKeyId, DeleteApiKeyCommand, GetApiKeysQuery,
    UpdateApiKeyCommand,
};

/// List API keys response
#[derive(Debug, Clone, Serialize)]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeyDTO>,
    pub total: usize,
}

/// GET /admin/api-keys
pub async fn list_api_keys(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
) -> Result<Json<ListApiKeysResponse>, ApiError> {
    debug!(account_id = %auth.account_id(), "Listing API keys");

    let keys = state
        .api_key_service
        .get_keys(GetApiKeysQuery::new(auth.account_id()))
        .await
        .map_err(ApiError::from)?;

    let api_keys: Vec<ApiKeyDTO> = keys.iter().map(ApiKeyDTO::from).collect();
    let total = api_keys.len();

    Ok(Json(ListApiKeysResponse { api_keys, total }))
}

/// POST /admin/api-keys
///
/// The body is the add-command; account scoping always comes from the
/// authenticated key, never from the payload. The secret appears in
/// the response exactly once.
pub async fn create_api_key(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Json(mut cmd): Json<AddApiKeyCommand>,
) -> Result<Json<ApiKeyDTO>, ApiError> {
    debug!(account_id = %auth.account_id(), name = %cmd.name, "Creating API key");

    cmd.account_id = auth.account_id();

    let created = state
        .api_key_service
        .add(cmd)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiKeyDTO::from(&created)))
}

/// GET /admin/api-keys/{key_id}
pub async fn get_api_key(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(key_id): Path<i64>,
) -> Result<Json<ApiKeyDTO>, ApiError> {
    debug!(account_id = %auth.account_id(), key_id, "Getting API key");

    let key = state
        .api_key_service
        .get(auth.account_id(), ApiKeyId::new(key_id))
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("API key '{}' not found", key_id)))?;

    Ok(Json(ApiKeyDTO::from(&key)))
}

/// PUT /admin/api-keys/{key_id}
pub async fn update_api_key(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(key_id): Path<i64>,
    Json(mut cmd): Json<UpdateApiKeyCommand>,
) -> Result<Json<ApiKeyDTO>, ApiError> {
    debug!(account_id = %auth.account_id(), key_id, "Updating API key");

    // The path is authoritative for the target key
    cmd.id = ApiKeyId::new(key_id);
    cmd.account_id = auth.account_id();

    let updated = state
        .api_key_service
        .update(cmd)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiKeyDTO::from(&updated)))
}

/// DELETE /admin/api-keys/{key_id}
pub async fn delete_api_key(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(key_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(account_id = %auth.account_id(), key_id, "Deleting API key");

    let cmd = DeleteApiKeyCommand {
        id: ApiKeyId::new(key_id),
        account_id: auth.account_id(),
    };

    let deleted = state
        .api_key_service
        .delete(cmd)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found(format!(
            "API key '{}' not found",
            key_id
        )));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": key_id
    })))
}
