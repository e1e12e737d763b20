//! # Result Store
//!
//! In-memory cache of resources fetched on behalf of webhook notifications.
//! Entries are keyed by resource id; the newest resource is listed first and
//! an update replaces the existing entry where it stands. Nothing survives a
//! restart.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tokio::sync::RwLock;

/// A fetched resource and when it arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub received_at: DateTime<Utc>,
    pub data: Value,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Whether an upsert added a new entry or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Shared, async-safe result list.
#[derive(Debug, Default)]
pub struct ResultStore {
    entries: RwLock<Vec<StoredResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `data` for `id`, stamped with the current time.
    pub async fn upsert(&self, id: &str, data: Value) -> UpsertOutcome {
        self.upsert_at(id, data, Utc::now()).await
    }

    pub async fn upsert_at(&self, id: &str, data: Value, received_at: DateTime<Utc>) -> UpsertOutcome {
        let entry = StoredResult {
            id: id.to_string(),
            received_at,
            data,
        };

        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => {
                *existing = entry;
                UpsertOutcome::Updated
            }
            None => {
                entries.insert(0, entry);
                UpsertOutcome::Inserted
            }
        }
    }

    /// All entries, newest insert first.
    pub async fn snapshot(&self) -> Vec<StoredResult> {
        self.entries.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<StoredResult> {
        self.entries.read().await.iter().find(|e| e.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn ids(results: &[StoredResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_new_entries_go_first() {
        let store = ResultStore::new();
        assert_eq!(store.upsert("a", json!(1)).await, UpsertOutcome::Inserted);
        assert_eq!(store.upsert("b", json!(2)).await, UpsertOutcome::Inserted);
        assert_eq!(store.upsert("c", json!(3)).await, UpsertOutcome::Inserted);
        assert_eq!(ids(&store.snapshot().await), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = ResultStore::new();
        store.upsert("a", json!({"v": 1})).await;
        store.upsert("b", json!({"v": 1})).await;
        assert_eq!(store.upsert("a", json!({"v": 2})).await, UpsertOutcome::Updated);

        let results = store.snapshot().await;
        assert_eq!(ids(&results), vec!["b", "a"]);
        assert_eq!(results[1].data, json!({"v": 2}));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let store = ResultStore::new();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        store.upsert_at("42", json!({"id": 42}), at).await;

        let json = serde_json::to_value(store.snapshot().await).unwrap();
        assert_eq!(
            json,
            json!([{"id": "42", "receivedAt": "2025-03-01T12:30:00.000Z", "data": {"id": 42}}])
        );
    }

    #[tokio::test]
    async fn test_get() {
        let store = ResultStore::new();
        assert!(store.is_empty().await);
        store.upsert("x", json!(null)).await;
        assert!(store.get("x").await.is_some());
        assert!(store.get("y").await.is_none());
    }
}
