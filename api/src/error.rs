/// Rejections the user has to fix before an edit can proceed. Raised only when
/// switching a raw body back to the form editor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("JSON body must be an object to edit as a form")]
    NotAnObject,
}
