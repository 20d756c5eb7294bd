use reqtool::{
  db::{memory::MemoryStore, repository::SqliteStore, KeyValueStore},
  domain::{
    field::{FieldType, TypedField},
    history::EntryId,
    request::{BodyMode, HttpMethod, KeyValue},
    response::{Outcome, ResponseStatus, StatusClass},
  },
  config::ToolConfig,
  error::ValidationError,
  history::ClearOutcome,
  RequestTool,
};
use serde_json::json;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

use crate::helpers::{
  entry_at, ok_json, spawn_test_tool, spawn_test_tool_with_store, RecordingEffects,
};

#[tokio::test]
async fn ambient_cookies_seed_the_draft_when_none_are_stored() {
  let (tool, _) = spawn_test_tool_with_store(
    ok_json("{}"),
    Box::new(MemoryStore::new()),
    Some("sid=abc; empty=; theme=dark"),
  )
  .await;
  assert_eq!(
    tool.draft.cookies,
    vec![KeyValue::new("sid", "abc"), KeyValue::new("theme", "dark")]
  );
  assert_eq!(tool.draft.url, "https://example.test/api");
  assert_eq!(tool.draft.method, HttpMethod::GET);
  assert_eq!(tool.draft.body_mode, BodyMode::FORM);
}

#[tokio::test]
async fn stored_cookies_win_over_ambient_ones() {
  let mut store = MemoryStore::new();
  store
    .set("cookies", json!([{ "key": "stored", "value": "1" }]))
    .await
    .unwrap();
  let (tool, _) =
    spawn_test_tool_with_store(ok_json("{}"), Box::new(store), Some("sid=abc")).await;
  assert_eq!(tool.draft.cookies, vec![KeyValue::new("stored", "1")]);
}

#[tokio::test]
async fn sending_records_history_and_shows_the_response() {
  let (mut tool, sent) = spawn_test_tool(ok_json("{\"ok\":true}")).await;
  tool.draft.method = HttpMethod::POST;
  tool.draft.add_cookie("sid", "abc");
  tool.draft.add_body_row(TypedField::new("n", FieldType::Number, "1"));

  let entry = tool.send().await;

  let sent = sent.lock().unwrap();
  assert_eq!(sent.len(), 1);
  assert_eq!(sent[0].body.as_deref(), Some("{\n  \"n\": 1\n}"));
  assert_eq!(sent[0].header_values("Cookie").collect::<Vec<_>>(), vec!["sid=abc"]);

  assert_eq!(tool.history.len(), 1);
  assert_eq!(tool.history.selected_id(), Some(entry.id));
  let view = tool.response.as_ref().unwrap();
  assert_eq!(view.status, ResponseStatus::Code(200));
  assert_eq!(view.class, StatusClass::Success);
  assert_eq!(view.body, "{\n  \"ok\": true\n}");
  assert!(!view.is_html);
}

#[tokio::test]
async fn sending_persists_cookies_and_history() {
  let (mut tool, _) = spawn_test_tool(ok_json("{}")).await;
  tool.draft.add_cookie("sid", "abc");
  tool.draft.add_cookie("", "nameless");
  tool.send().await;

  let mut store = tool.into_store();
  assert_eq!(
    store.get("cookies", json!(null)).await.unwrap(),
    json!([{ "key": "sid", "value": "abc" }])
  );
  let history = store.get("history", json!([])).await.unwrap();
  assert_eq!(history.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn timeouts_are_recorded_not_raised() {
  let (mut tool, _) = spawn_test_tool(Outcome::Timeout).await;
  let entry = tool.send().await;
  assert_eq!(entry.status, ResponseStatus::Timeout);

  let view = tool.response.as_ref().unwrap();
  assert_eq!(view.status.to_string(), "Timeout");
  assert_eq!(view.class, StatusClass::ServerError);
  assert_eq!(view.body, "The request timed out.");
}

#[tokio::test]
async fn rejected_body_switch_leaves_the_draft_alone() {
  let (mut tool, _) = spawn_test_tool(ok_json("{}")).await;
  tool.draft.body_mode = BodyMode::RAW;
  tool.draft.raw_body = String::from("{ broken");
  let before = tool.draft.clone();

  assert!(matches!(
    tool.toggle_body_mode(),
    Err(ValidationError::InvalidJson(_))
  ));
  assert_eq!(tool.draft, before);

  tool.draft.raw_body = String::from("{\"a\": \"b\"}");
  assert_eq!(tool.toggle_body_mode(), Ok(BodyMode::FORM));
  assert_eq!(
    tool.draft.body_rows,
    vec![TypedField::new("a", FieldType::String, "b")]
  );
}

#[tokio::test]
async fn replaying_an_entry_restores_draft_and_response() {
  let (mut tool, _) = spawn_test_tool(ok_json("[1]")).await;
  tool.draft.url = String::from("https://example.test/first");
  let first = tool.send().await;
  tool.draft.url = String::from("https://example.test/second");
  tool.draft.method = HttpMethod::DELETE;
  tool.send().await;

  assert!(tool.replay(first.id));
  assert_eq!(tool.draft.url, "https://example.test/first");
  assert_eq!(tool.draft.method, HttpMethod::GET);
  assert_eq!(tool.history.selected_id(), Some(first.id));
  assert_eq!(tool.response.as_ref().unwrap().body, "[\n  1\n]");

  let draft = tool.draft.clone();
  assert!(!tool.replay(EntryId::at(1)));
  assert_eq!(tool.draft, draft);
}

#[tokio::test]
async fn history_limit_is_clamped_and_persisted() {
  let (mut tool, _) = spawn_test_tool(ok_json("{}")).await;
  tool.send().await;
  tool.send().await;

  assert_eq!(tool.set_history_limit(0).await, 1);
  assert_eq!(tool.history.len(), 1);

  let mut store = tool.into_store();
  assert_eq!(store.get("historyLimit", json!(null)).await.unwrap(), json!(1));
}

#[tokio::test]
async fn clearing_twice_reports_already_empty() {
  let (mut tool, _) = spawn_test_tool(ok_json("{}")).await;
  tool.send().await;
  assert_eq!(tool.clear_history().await, ClearOutcome::Cleared(1));
  assert_eq!(tool.clear_history().await, ClearOutcome::AlreadyEmpty);
  assert!(tool.history.is_empty());
}

#[tokio::test]
async fn persisted_history_is_trimmed_to_the_persisted_limit() {
  let mut store = MemoryStore::new();
  let entries: Vec<_> = (1..=5).map(entry_at).collect();
  store
    .set("history", serde_json::to_value(&entries).unwrap())
    .await
    .unwrap();
  store.set("historyLimit", json!(3)).await.unwrap();

  let (tool, _) = spawn_test_tool_with_store(ok_json("{}"), Box::new(store), None).await;
  assert_eq!(tool.history.capacity(), 3);
  let timestamps: Vec<i64> = tool.history.entries().iter().map(|e| e.timestamp).collect();
  assert_eq!(timestamps, vec![3, 4, 5]);
}

#[tokio::test]
async fn malformed_persisted_values_fall_back_to_defaults() {
  let mut store = MemoryStore::new();
  store.set("history", json!("garbage")).await.unwrap();
  store.set("historyLimit", json!(-4)).await.unwrap();
  store.set("cookies", json!({ "not": "a list" })).await.unwrap();

  let (tool, _) = spawn_test_tool_with_store(ok_json("{}"), Box::new(store), None).await;
  assert!(tool.history.is_empty());
  assert_eq!(tool.history.capacity(), 20);
  assert!(tool.draft.cookies.is_empty());
}

#[tokio::test]
async fn history_survives_a_restart_with_sqlite() {
  let dir = tempfile::tempdir().unwrap();
  let url = format!("sqlite:{}", dir.path().join("reqtool.sqlite").display());

  let store = SqliteStore::connect(&url).await.unwrap();
  let (mut tool, _) = spawn_test_tool_with_store(ok_json("{}"), Box::new(store), None).await;
  tool.draft.add_cookie("sid", "abc");
  let entry = tool.send().await;
  drop(tool.into_store());

  let store = SqliteStore::connect(&url).await.unwrap();
  let (tool, _) = spawn_test_tool_with_store(ok_json("{}"), Box::new(store), None).await;
  assert_eq!(tool.history.len(), 1);
  assert_eq!(tool.history.entries()[0].id, entry.id);
  assert_eq!(tool.draft.cookies, vec![KeyValue::new("sid", "abc")]);
}

#[tokio::test]
async fn copying_reports_success_and_failure() {
  let (mut tool, _) = spawn_test_tool(ok_json("{\"a\":1}")).await;
  tool.send().await;

  let effects = RecordingEffects::default();
  assert_eq!(tool.copy_response(&effects), "Response copied to clipboard!");
  assert_eq!(*effects.copied.lock().unwrap(), vec!["{\n  \"a\": 1\n}".to_string()]);

  let failing = RecordingEffects {
    fail: true,
    ..RecordingEffects::default()
  };
  assert_eq!(
    tool.copy_response(&failing),
    "Failed to copy response: clipboard unavailable"
  );
}

#[tokio::test]
async fn only_html_responses_open_in_a_new_view() {
  let html = "  <!DOCTYPE html><html><body>hi</body></html>";
  let (mut tool, _) = spawn_test_tool(ok_json(html)).await;
  let effects = RecordingEffects::default();
  assert_eq!(tool.open_html_response(&effects), "No HTML response to open");

  tool.send().await;
  assert!(tool.response.as_ref().unwrap().is_html);
  assert_eq!(tool.open_html_response(&effects), "Opened response in a new tab");
  assert_eq!(*effects.opened.lock().unwrap(), vec![html.to_string()]);

  let failing = RecordingEffects {
    fail: true,
    ..RecordingEffects::default()
  };
  assert_eq!(
    tool.open_html_response(&failing),
    "Failed to open new tab. Please allow popups for this site."
  );
}

#[tokio::test]
async fn json_responses_are_not_treated_as_html() {
  let (mut tool, _) = spawn_test_tool(ok_json("{\"html\":\"<html>\"}")).await;
  tool.send().await;
  let effects = RecordingEffects::default();
  assert_eq!(tool.open_html_response(&effects), "No HTML response to open");
  assert!(effects.opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn tool_built_from_config_uses_its_database_and_transport() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(204))
    .expect(1)
    .mount(&server)
    .await;
  let dir = tempfile::tempdir().unwrap();
  let config = ToolConfig {
    default_url: server.uri(),
    database_url: format!("sqlite:{}", dir.path().join("config.sqlite").display()),
    request_timeout_secs: Some(5),
    history_limit: 4,
    ..ToolConfig::default()
  };

  let mut tool = RequestTool::from_config(&config, None).await.unwrap();
  assert_eq!(tool.history.capacity(), 4);
  let entry = tool.send().await;
  assert_eq!(entry.status, ResponseStatus::Code(204));
  drop(tool.into_store());

  let reloaded = RequestTool::from_config(&config, None).await.unwrap();
  assert_eq!(reloaded.history.len(), 1);
  assert_eq!(reloaded.history.entries()[0].id, entry.id);
}

#[tokio::test]
async fn tool_from_config_reports_unusable_databases() {
  let dir = tempfile::tempdir().unwrap();
  let config = ToolConfig {
    database_url: format!("sqlite:{}", dir.path().join("missing").join("db.sqlite").display()),
    ..ToolConfig::default()
  };
  assert!(RequestTool::from_config(&config, None).await.is_err());
}
