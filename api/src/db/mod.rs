pub mod memory;
pub mod repository;

use async_trait::async_trait;
use serde_json::Value;

/// Names under which console state is persisted.
pub const COOKIES_KEY: &str = "cookies";
pub const HISTORY_KEY: &str = "history";
pub const HISTORY_LIMIT_KEY: &str = "historyLimit";

/// Name/value persistence for console state. Values are opaque JSON.
#[async_trait]
pub trait KeyValueStore: Send {
    /// The stored value, or `default` when nothing is stored under `name`.
    async fn get(&mut self, name: &str, default: Value) -> anyhow::Result<Value>;
    async fn set(&mut self, name: &str, value: Value) -> anyhow::Result<()>;
}
