use fomake_dom::DomError;
use thiserror::Error;

/// Errors surfaced by the converter's entry points. The conversion itself
/// never fails; only reading input and configuration does.
#[derive(Error, Debug)]
pub enum FomakeError {
    #[error("Markup parsing failed: {0}")]
    Markup(#[from] DomError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
