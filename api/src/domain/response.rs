use serde::{Deserialize, Serialize};

/// Terminal result of one send attempt. Network failures are values here, never
/// errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Success {
        status: u16,
        status_text: String,
        response_headers: String,
        response_body: String,
    },
    TransportError {
        message: String,
    },
    Timeout,
}
impl Outcome {
    pub fn status(&self) -> ResponseStatus {
        match self {
            Outcome::Success { status, .. } => ResponseStatus::Code(*status),
            Outcome::TransportError { .. } => ResponseStatus::Error,
            Outcome::Timeout => ResponseStatus::Timeout,
        }
    }
}

/// Status as recorded in history. Failed sends carry a sentinel instead of a
/// number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Code(u16),
    Error,
    Timeout,
}
impl ResponseStatus {
    pub fn code(&self) -> Option<u16> {
        match self {
            ResponseStatus::Code(code) => Some(*code),
            _ => None,
        }
    }
}
impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Code(code) => write!(f, "{}", code),
            ResponseStatus::Error => f.write_str("Error"),
            ResponseStatus::Timeout => f.write_str("Timeout"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

/// What the result pane shows for the last response.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseView {
    pub status: ResponseStatus,
    pub class: StatusClass,
    pub status_text: String,
    pub headers: String,
    pub body: String,
    /// Raw body as received, kept for opening in a new view.
    pub raw_body: Option<String>,
    pub is_html: bool,
}
