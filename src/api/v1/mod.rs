//! Caller-facing v1 API

use axum::{routing::get, Router};
use tracing::debug;

use super::middleware::RequireApiKey;
use super::state::AppState;
use super::types::Json;
use crate::domain::api_key::ApiKeyDTO;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/key", get(current_key))
}

/// GET /v1/key
///
/// Self-introspection: any valid key can look up its own projection.
pub async fn current_key(RequireApiKey(api_key): RequireApiKey) -> Json<ApiKeyDTO> {
    debug!(account_id = %api_key.account_id(), id = %api_key.id(), "Key introspection");

    Json(ApiKeyDTO::from(&api_key))
}
