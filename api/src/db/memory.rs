use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::KeyValueStore;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&mut self, name: &str, default: Value) -> anyhow::Result<Value> {
        Ok(self.values.get(name).cloned().unwrap_or(default))
    }

    async fn set(&mut self, name: &str, value: Value) -> anyhow::Result<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}
