//! API configuration handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::config::ApiConfig;

use super::super::state::AppState;
use super::ApiError;

/// Request body for `POST /set-config`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConfigRequest {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
}

/// POST /set-config - store the upstream URL and token.
///
/// The token is never echoed back or logged.
pub async fn set_config(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SetConfigRequest>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(req)) = body else {
        return Err(ApiError::bad_request("Missing apiUrl or apiToken"));
    };

    let config = ApiConfig::new(
        req.api_url.as_deref().unwrap_or_default(),
        req.api_token.as_deref().unwrap_or_default(),
    )?;

    info!("API config set: {}", config.api_url);
    state.set_api_config(config.clone()).await;

    Ok(Json(json!({"success": true, "config": config})))
}

/// GET /get-config - current upstream URL, without the token.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.api_config.read().await.clone();
    Json(json!({"success": true, "configured": config.is_some(), "config": config}))
}
