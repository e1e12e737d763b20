//! Webhook relay handlers.
//!
//! The upstream API notifies `POST /webhook` with `{"resourceId": ...}`.
//! The relay fetches that resource with the stored credentials and caches
//! the result for `GET /get-data`.
//!
//! Cached results are keyed by the id's text, so `42` and `"42"` name the
//! same resource: a second notification for either replaces the first.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

use crate::store::UpsertOutcome;

use super::super::state::AppState;
use super::ApiError;

/// POST /webhook - fetch and cache the notified resource.
pub async fn receive(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<Value>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::bad_request("Invalid payload"));
    };
    let Some(resource_id) = resource_id(&payload) else {
        return Err(ApiError::bad_request("Invalid payload"));
    };

    // Every relay-side failure answers the webhook with 500.
    let client = state
        .client()
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let fetched = client.fetch_resource(&resource_id).await.map_err(|e| {
        error!("Failed to fetch resource {}: {}", resource_id, e);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to fetch resource: {}", e),
        )
    })?;

    match state.results.upsert(&resource_id, fetched.clone()).await {
        UpsertOutcome::Inserted => info!("New resource added: {}", resource_id),
        UpsertOutcome::Updated => info!("Updated resource: {}", resource_id),
    }

    Ok(Json(json!({
        "success": true,
        "received": payload,
        "fetched": fetched,
    })))
}

/// GET /get-data - cached webhook results, newest first.
pub async fn results(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"success": true, "results": state.results.snapshot().await}))
}

/// The notified resource id: a non-empty string or a non-zero number.
fn resource_id(payload: &Value) -> Option<String> {
    match payload.get("resourceId")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id() {
        assert_eq!(resource_id(&json!({"resourceId": "abc"})).as_deref(), Some("abc"));
        assert_eq!(resource_id(&json!({"resourceId": 42})).as_deref(), Some("42"));
        assert_eq!(resource_id(&json!({"resourceId": ""})), None);
        assert_eq!(resource_id(&json!({"resourceId": 0})), None);
        assert_eq!(resource_id(&json!({"resourceId": null})), None);
        assert_eq!(resource_id(&json!({"other": 1})), None);
        assert_eq!(resource_id(&json!([1])), None);
    }

    #[tokio::test]
    async fn test_numeric_and_string_ids_share_an_entry() {
        let store = crate::store::ResultStore::new();
        let numeric = resource_id(&json!({"resourceId": 42})).unwrap();
        let text = resource_id(&json!({"resourceId": "42"})).unwrap();

        assert_eq!(store.upsert(&numeric, json!({"v": 1})).await, UpsertOutcome::Inserted);
        assert_eq!(store.upsert(&text, json!({"v": 2})).await, UpsertOutcome::Updated);

        let results = store.snapshot().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "42");
        assert_eq!(results[0].data, json!({"v": 2}));
    }
}
