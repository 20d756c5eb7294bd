//! Request/response pipeline: draft to wire request, outcome to history entry,
//! and history entry back to draft.

use log::debug;

use crate::codec;
use crate::domain::history::{EntryId, HistoryEntry, RequestSnapshot, ResponseSnapshot};
use crate::domain::request::{BodyMode, KeyValue, RequestDraft, WireRequest};
use crate::domain::response::{Outcome, StatusClass};
use crate::error::ValidationError;
use crate::history::HistoryLog;

pub fn build_request(draft: &RequestDraft) -> WireRequest {
    let mut headers: Vec<(String, String)> = Vec::new();
    for header in keyed(&draft.headers) {
        match headers.iter_mut().find(|(key, _)| *key == header.key) {
            Some(existing) => existing.1 = header.value.clone(),
            None => headers.push((header.key.clone(), header.value.clone())),
        }
    }
    // Appended even when the user supplied their own Cookie header; both go out.
    if let Some(cookie) = cookie_header(&draft.cookies) {
        headers.push((String::from("Cookie"), cookie));
    }
    let wire = WireRequest {
        method: draft.method,
        url: draft.url.clone(),
        headers,
        body: request_body(draft),
    };
    debug!("built {} {} with {} headers", wire.method, wire.url, wire.headers.len());
    wire
}

/// `key1=value1; key2=value2` in row order, or nothing when no cookie has a key.
pub fn cookie_header(cookies: &[KeyValue]) -> Option<String> {
    let joined = keyed(cookies)
        .map(|c| format!("{}={}", c.key, c.value))
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

/// Body text as sent, or `None` for methods that do not carry one.
pub fn request_body(draft: &RequestDraft) -> Option<String> {
    if !draft.method.allows_body() {
        return None;
    }
    Some(match draft.body_mode {
        BodyMode::RAW => draft.raw_body.clone(),
        BodyMode::FORM => codec::rows_to_text(&draft.body_rows),
    })
}

pub fn classify(status: Option<u16>) -> StatusClass {
    match status {
        Some(200..=299) => StatusClass::Success,
        Some(300..=399) => StatusClass::Redirect,
        Some(400..=499) => StatusClass::ClientError,
        _ => StatusClass::ServerError,
    }
}

/// Records exactly one history entry for a finished send, appends it (which
/// also selects it) and returns a copy.
pub fn complete_session(
    log: &mut HistoryLog,
    draft: &RequestDraft,
    outcome: &Outcome,
    timestamp: i64,
) -> HistoryEntry {
    let (status_text, response) = match outcome {
        Outcome::Success {
            status_text,
            response_headers,
            response_body,
            ..
        } => (
            status_text.clone(),
            ResponseSnapshot {
                headers: response_headers.clone(),
                body: response_body.clone(),
            },
        ),
        Outcome::TransportError { message } => (
            String::new(),
            ResponseSnapshot {
                headers: String::new(),
                body: format!("Request failed: {}", message),
            },
        ),
        Outcome::Timeout => (
            String::new(),
            ResponseSnapshot {
                headers: String::new(),
                body: String::from("The request timed out."),
            },
        ),
    };
    let entry = HistoryEntry {
        id: EntryId::at(timestamp),
        timestamp,
        method: draft.method,
        url: draft.url.clone(),
        status: outcome.status(),
        status_text,
        request: RequestSnapshot {
            headers: keyed(&draft.headers).cloned().collect(),
            cookies: keyed(&draft.cookies).cloned().collect(),
            body: request_body(draft),
        },
        response,
    };
    log.append(entry.clone());
    entry
}

/// Rebuilds an editable draft from a history entry. Pure, so replaying the same
/// entry twice gives equal drafts.
pub fn rehydrate(entry: &HistoryEntry) -> RequestDraft {
    let mut draft = RequestDraft {
        url: entry.url.clone(),
        method: entry.method,
        headers: entry.request.headers.clone(),
        cookies: entry.request.cookies.clone(),
        body_mode: BodyMode::FORM,
        body_rows: vec![],
        raw_body: String::from("{}"),
    };
    if let Some(body) = &entry.request.body {
        draft.raw_body = body.clone();
        match codec::text_to_rows(body) {
            Ok(rows) => draft.body_rows = rows,
            Err(_) => draft.body_mode = BodyMode::RAW,
        }
    }
    draft
}

/// Flips the draft's body editor. On a rejected RAW to FORM switch the draft is
/// left exactly as it was.
pub fn toggle_body_mode(draft: &mut RequestDraft) -> Result<BodyMode, ValidationError> {
    match codec::toggle_mode(draft.body_mode, &draft.body_rows, &draft.raw_body)? {
        codec::ModeSwitch::ToRaw { raw_text } => {
            draft.raw_body = raw_text;
            draft.body_mode = BodyMode::RAW;
        }
        codec::ModeSwitch::ToForm { rows } => {
            draft.body_rows = rows;
            draft.body_mode = BodyMode::FORM;
        }
    }
    Ok(draft.body_mode)
}

fn keyed(rows: &[KeyValue]) -> impl Iterator<Item = &KeyValue> {
    rows.iter().filter(|row| !row.key.is_empty())
}
