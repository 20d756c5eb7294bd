use serde::{Deserialize, Serialize};

use crate::domain::field::TypedField;

#[derive(Clone, Copy, Serialize, Debug, Deserialize, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}
impl HttpMethod {
    /// Only these methods transmit a body; for the rest it is dropped at build time.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}
impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One header or cookie row as the user typed it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Debug)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}
impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Parses a `document.cookie` style string (`a=1; b=2`). Pairs missing a key or
/// a value are dropped.
pub fn parse_cookie_string(raw: &str) -> Vec<KeyValue> {
    raw.split("; ")
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?.trim();
            let value = parts.next()?;
            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some(KeyValue::new(key, value))
            }
        })
        .collect()
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub enum BodyMode {
    #[default]
    FORM,
    RAW,
}

/// The live, user-editable request. Renderers project from this; nothing reads
/// request state back out of a widget tree.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDraft {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<KeyValue>,
    pub cookies: Vec<KeyValue>,
    pub body_mode: BodyMode,
    pub body_rows: Vec<TypedField>,
    pub raw_body: String,
}
impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::GET,
            headers: vec![KeyValue::new("Content-Type", "application/json")],
            cookies: vec![],
            body_mode: BodyMode::FORM,
            body_rows: vec![],
            raw_body: String::from("{}"),
        }
    }
}
impl RequestDraft {
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push(KeyValue::new(key, value));
    }
    pub fn add_cookie(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cookies.push(KeyValue::new(key, value));
    }
    pub fn add_body_row(&mut self, row: TypedField) {
        self.body_rows.push(row);
    }

    /// Removes a row by index. Out of range indices are ignored.
    pub fn remove_header(&mut self, index: usize) -> Option<KeyValue> {
        (index < self.headers.len()).then(|| self.headers.remove(index))
    }
    pub fn remove_cookie(&mut self, index: usize) -> Option<KeyValue> {
        (index < self.cookies.len()).then(|| self.cookies.remove(index))
    }
    pub fn remove_body_row(&mut self, index: usize) -> Option<TypedField> {
        (index < self.body_rows.len()).then(|| self.body_rows.remove(index))
    }

    pub fn body_row_mut(&mut self, index: usize) -> Option<&mut TypedField> {
        self.body_rows.get_mut(index)
    }
}

/// What actually goes over the wire. `headers` may hold the same name twice
/// (an explicit `Cookie` next to the synthesized one) and must be sent as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}
impl WireRequest {
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
