use std::fs;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::request::KeyValue;
use crate::history::{clamp_capacity, DEFAULT_CAPACITY};

fn default_headers() -> Vec<KeyValue> {
    vec![KeyValue::new("Content-Type", "application/json")]
}

fn default_history_limit() -> usize {
    DEFAULT_CAPACITY
}

fn default_database_url() -> String {
    String::from("sqlite:reqtool.sqlite")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub default_url: String,
    #[serde(default = "default_headers")]
    pub default_headers: Vec<KeyValue>,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Transport deadline in seconds. The pipeline itself never times out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            default_url: String::new(),
            default_headers: default_headers(),
            history_limit: default_history_limit(),
            request_timeout_secs: None,
            database_url: default_database_url(),
        }
    }
}

impl ToolConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn history_capacity(&self) -> usize {
        clamp_capacity(self.history_limit)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
