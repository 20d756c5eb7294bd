pub mod codec;
pub mod config;
pub mod db;
pub mod domain;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod history;
pub mod session;
pub mod transport;
pub mod utilities;

use chrono::Utc;
use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::ToolConfig;
use crate::db::repository::SqliteStore;
use crate::db::{KeyValueStore, COOKIES_KEY, HISTORY_KEY, HISTORY_LIMIT_KEY};
use crate::domain::history::{EntryId, HistoryEntry};
use crate::domain::request::{parse_cookie_string, BodyMode, KeyValue, RequestDraft};
use crate::domain::response::ResponseView;
use crate::effects::Effects;
use crate::error::ValidationError;
use crate::geometry::PanelGeometry;
use crate::history::{ClearOutcome, HistoryLog};
use crate::transport::{ReqwestTransport, Transport};
use crate::utilities::response::{build_response_view, view_from_entry};

pub use crate::domain::request::HttpMethod;

/// One console session: the draft being edited, the history log, the result
/// pane and the panel/launcher geometry, wired to a transport and a store.
pub struct RequestTool {
    pub draft: RequestDraft,
    pub history: HistoryLog,
    pub response: Option<ResponseView>,
    pub panel: PanelGeometry,
    pub launcher: PanelGeometry,
    transport: Box<dyn Transport>,
    store: Box<dyn KeyValueStore>,
}

impl RequestTool {
    /// Connects the sqlite store at `config.database_url` and a reqwest
    /// transport with the configured timeout, then loads saved state.
    pub async fn from_config(config: &ToolConfig, ambient_cookies: Option<&str>) -> anyhow::Result<Self> {
        let store = SqliteStore::connect(&config.database_url).await?;
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::load(config, Box::new(transport), Box::new(store), ambient_cookies).await)
    }

    /// Restores cookies, history and the history limit from `store`. Stored
    /// cookies win; when there are none, `ambient_cookies` (a `document.cookie`
    /// style string) seeds the list. Unreadable values fall back to defaults.
    pub async fn load(
        config: &ToolConfig,
        transport: Box<dyn Transport>,
        mut store: Box<dyn KeyValueStore>,
        ambient_cookies: Option<&str>,
    ) -> Self {
        let mut cookies: Vec<KeyValue> = load_value(store.as_mut(), COOKIES_KEY, vec![]).await;
        if cookies.is_empty() {
            cookies = ambient_cookies.map(parse_cookie_string).unwrap_or_default();
        }
        let limit: usize =
            load_value(store.as_mut(), HISTORY_LIMIT_KEY, config.history_capacity()).await;
        let entries: Vec<HistoryEntry> = load_value(store.as_mut(), HISTORY_KEY, vec![]).await;
        let history = HistoryLog::from_entries(entries, limit);
        info!(
            "loaded {} history entries (limit {}) and {} cookies",
            history.len(),
            history.capacity(),
            cookies.len()
        );

        RequestTool {
            draft: RequestDraft {
                url: config.default_url.clone(),
                headers: config.default_headers.clone(),
                cookies,
                ..RequestDraft::default()
            },
            history,
            response: None,
            panel: PanelGeometry::panel(),
            launcher: PanelGeometry::launcher(),
            transport,
            store,
        }
    }

    /// Sends the current draft and records the outcome. Transport failures end
    /// up in the returned entry, not as an error.
    pub async fn send(&mut self) -> HistoryEntry {
        let wire = session::build_request(&self.draft);
        let cookies: Vec<KeyValue> = self
            .draft
            .cookies
            .iter()
            .filter(|c| !c.key.is_empty())
            .cloned()
            .collect();
        self.persist(COOKIES_KEY, &cookies).await;

        let outcome = self.transport.send(&wire).await;
        self.response = Some(build_response_view(&outcome));
        let timestamp = self.next_timestamp();
        let entry = session::complete_session(&mut self.history, &self.draft, &outcome, timestamp);
        info!("{} {} finished with {}", entry.method, entry.url, entry.status);
        self.persist_history().await;
        entry
    }

    pub fn toggle_body_mode(&mut self) -> Result<BodyMode, ValidationError> {
        session::toggle_body_mode(&mut self.draft).map_err(|e| {
            warn!("body mode switch rejected: {}", e);
            e
        })
    }

    /// Selects a history entry and loads it back into the draft and the result
    /// pane. Unknown ids change nothing.
    pub fn replay(&mut self, id: EntryId) -> bool {
        if !self.history.select(id) {
            return false;
        }
        let Some(entry) = self.history.selected() else {
            return false;
        };
        self.draft = session::rehydrate(entry);
        self.response = Some(view_from_entry(entry));
        true
    }

    pub async fn set_history_limit(&mut self, limit: usize) -> usize {
        let applied = self.history.set_capacity(limit);
        self.persist(HISTORY_LIMIT_KEY, &applied).await;
        self.persist_history().await;
        applied
    }

    pub async fn clear_history(&mut self) -> ClearOutcome {
        let outcome = self.history.clear();
        if let ClearOutcome::Cleared(removed) = outcome {
            info!("cleared {} history entries", removed);
            self.persist_history().await;
        }
        outcome
    }

    /// Copies the displayed response body. Returns the message to show the user.
    pub fn copy_response(&self, effects: &dyn Effects) -> String {
        let text = self.response.as_ref().map(|r| r.body.as_str()).unwrap_or_default();
        match effects.copy_text(text) {
            Ok(()) => String::from("Response copied to clipboard!"),
            Err(e) => {
                warn!("clipboard write failed: {}", e);
                format!("Failed to copy response: {}", e)
            }
        }
    }

    /// Opens an HTML response in a new view. Returns the message to show the
    /// user.
    pub fn open_html_response(&self, effects: &dyn Effects) -> String {
        let html = self
            .response
            .as_ref()
            .filter(|r| r.is_html)
            .and_then(|r| r.raw_body.as_deref());
        let Some(html) = html else {
            return String::from("No HTML response to open");
        };
        match effects.open_in_new_view(html) {
            Ok(()) => String::from("Opened response in a new tab"),
            Err(e) => {
                warn!("opening new view failed: {}", e);
                String::from("Failed to open new tab. Please allow popups for this site.")
            }
        }
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    // Epoch millis, never earlier than the newest entry so appends stay ordered.
    fn next_timestamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.history
            .entries()
            .last()
            .map_or(now, |last| now.max(last.timestamp))
    }

    async fn persist_history(&mut self) {
        let entries = self.history.entries().to_vec();
        self.persist(HISTORY_KEY, &entries).await;
    }

    async fn persist<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!("could not serialize {}: {}", name, e);
                return;
            }
        };
        if let Err(e) = self.store.set(name, value).await {
            warn!("could not persist {}: {}", name, e);
        }
    }
}

async fn load_value<T: DeserializeOwned>(store: &mut dyn KeyValueStore, name: &str, default: T) -> T {
    let raw = match store.get(name, Value::Null).await {
        Ok(Value::Null) => return default,
        Ok(raw) => raw,
        Err(e) => {
            warn!("could not read {}: {}", name, e);
            return default;
        }
    };
    serde_json::from_value(raw).unwrap_or_else(|e| {
        warn!("discarding malformed {}: {}", name, e);
        default
    })
}
