use std::time::Duration;

use reqtool::{config::ToolConfig, domain::request::KeyValue};

#[test]
fn missing_fields_take_defaults() {
  let config = ToolConfig::from_toml_str("default_url = \"https://example.test\"").unwrap();
  assert_eq!(config.default_url, "https://example.test");
  assert_eq!(
    config.default_headers,
    vec![KeyValue::new("Content-Type", "application/json")]
  );
  assert_eq!(config.history_limit, 20);
  assert_eq!(config.request_timeout(), None);
  assert_eq!(config.database_url, "sqlite:reqtool.sqlite");
}

#[test]
fn history_limit_is_clamped_on_use() {
  let config = ToolConfig::from_toml_str("history_limit = 500\nrequest_timeout_secs = 30").unwrap();
  assert_eq!(config.history_capacity(), 100);
  assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn parses_header_tables() {
  let raw = r#"
    [[default_headers]]
    key = "Accept"
    value = "text/plain"
  "#;
  let config = ToolConfig::from_toml_str(raw).unwrap();
  assert_eq!(config.default_headers, vec![KeyValue::new("Accept", "text/plain")]);
}

#[test]
fn loading_a_missing_file_gives_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let config = ToolConfig::load(dir.path().join("absent.toml")).unwrap();
  assert_eq!(config, ToolConfig::default());
}

#[test]
fn loads_from_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("reqtool.toml");
  std::fs::write(&path, "history_limit = 7").unwrap();
  assert_eq!(ToolConfig::load(&path).unwrap().history_limit, 7);
}

#[test]
fn rejects_malformed_toml() {
  assert!(ToolConfig::from_toml_str("history_limit = \"many\"").is_err());
}
