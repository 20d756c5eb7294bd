use reqtool::db::{memory::MemoryStore, repository::SqliteStore, KeyValueStore};
use serde_json::json;

#[tokio::test]
async fn sqlite_store_returns_default_for_missing_names() {
  let mut store = SqliteStore::connect("sqlite::memory:").await.unwrap();
  let value = store.get("cookies", json!([])).await.unwrap();
  assert_eq!(value, json!([]));
}

#[tokio::test]
async fn sqlite_store_upserts_values() {
  let mut store = SqliteStore::connect("sqlite::memory:").await.unwrap();
  store.set("historyLimit", json!(20)).await.unwrap();
  store.set("historyLimit", json!(5)).await.unwrap();
  assert_eq!(store.get("historyLimit", json!(0)).await.unwrap(), json!(5));
}

#[tokio::test]
async fn sqlite_store_persists_across_connections() {
  let dir = tempfile::tempdir().unwrap();
  let url = format!("sqlite:{}", dir.path().join("state.sqlite").display());

  let mut store = SqliteStore::connect(&url).await.unwrap();
  store
    .set("cookies", json!([{ "key": "sid", "value": "abc" }]))
    .await
    .unwrap();
  store.close().await.unwrap();

  let mut reopened = SqliteStore::connect(&url).await.unwrap();
  assert_eq!(
    reopened.get("cookies", json!([])).await.unwrap(),
    json!([{ "key": "sid", "value": "abc" }])
  );
}

#[tokio::test]
async fn memory_store_round_trips_values() {
  let mut store = MemoryStore::new();
  assert_eq!(store.get("history", json!([])).await.unwrap(), json!([]));
  store.set("history", json!([1, 2])).await.unwrap();
  assert_eq!(store.peek("history"), Some(&json!([1, 2])));
}
