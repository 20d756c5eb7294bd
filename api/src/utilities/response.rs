use crate::codec::pretty;
use crate::domain::history::HistoryEntry;
use crate::domain::response::{Outcome, ResponseStatus, ResponseView};
use crate::session::classify;

pub fn build_response_view(outcome: &Outcome) -> ResponseView {
    match outcome {
        Outcome::Success {
            status,
            status_text,
            response_headers,
            response_body,
        } => success_view(
            ResponseStatus::Code(*status),
            status_text,
            response_headers,
            response_body,
        ),
        Outcome::TransportError { message } => failure_view(
            ResponseStatus::Error,
            format!("Request failed: {}", message),
        ),
        Outcome::Timeout => failure_view(
            ResponseStatus::Timeout,
            String::from("The request timed out."),
        ),
    }
}

/// Response pane contents for a replayed history entry.
pub fn view_from_entry(entry: &HistoryEntry) -> ResponseView {
    match entry.status {
        ResponseStatus::Code(_) => success_view(
            entry.status,
            &entry.status_text,
            &entry.response.headers,
            &entry.response.body,
        ),
        status => failure_view(status, entry.response.body.clone()),
    }
}

fn success_view(status: ResponseStatus, status_text: &str, headers: &str, body: &str) -> ResponseView {
    let (display, is_html) = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => (pretty(&json), false),
        Err(_) => (body.to_string(), looks_like_html(body)),
    };
    ResponseView {
        status,
        class: classify(status.code()),
        status_text: status_text.to_string(),
        headers: headers.to_string(),
        body: display,
        raw_body: Some(body.to_string()),
        is_html,
    }
}

fn failure_view(status: ResponseStatus, body: String) -> ResponseView {
    ResponseView {
        status,
        class: classify(None),
        status_text: String::new(),
        headers: String::new(),
        body,
        raw_body: None,
        is_html: false,
    }
}

pub fn looks_like_html(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.starts_with("<!DOCTYPE html>") || trimmed.starts_with("<html")
}
