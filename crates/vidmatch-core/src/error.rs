use thiserror::Error;
use vidmatch_api::YouTubeError;

/// Errors from the record store and configuration layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("invalid record: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a single-unit match run (`resolve`, `discover`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("could not extract a YouTube video id from {0:?}")]
    MalformedReference(String),

    #[error("search query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Service(#[from] YouTubeError),
}
