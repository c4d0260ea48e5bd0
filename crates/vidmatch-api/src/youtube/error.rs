use thiserror::Error;

use super::types::ApiErrorEnvelope;

/// Errors from the YouTube Data API client.
///
/// This is a closed set: callers match on the variant, never on transport
/// or SDK specifics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YouTubeError {
    #[error("no YouTube API key provided")]
    NoCredential,

    #[error("YouTube daily quota exceeded")]
    QuotaExceeded,

    #[error("YouTube Data API v3 is not enabled for this key's project")]
    ServiceNotEnabled,

    #[error("invalid YouTube API key")]
    InvalidCredential,

    #[error("video {0} not found (it may be private or deleted)")]
    NotFound(String),

    #[error("YouTube request failed: {0}")]
    Transient(String),
}

impl YouTubeError {
    /// Whether this failure needs the operator to act (new key, enable the
    /// API, wait for quota) rather than simply re-running.
    pub fn requires_operator(&self) -> bool {
        matches!(
            self,
            Self::NoCredential | Self::QuotaExceeded | Self::ServiceNotEnabled | Self::InvalidCredential
        )
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transient(e.to_string())
    }
}

const QUOTA_REASONS: &[&str] = &["quotaExceeded", "dailyLimitExceeded", "RATE_LIMIT_EXCEEDED"];
const NOT_ENABLED_REASONS: &[&str] = &["accessNotConfigured", "SERVICE_DISABLED"];
const INVALID_KEY_REASONS: &[&str] = &["keyInvalid", "API_KEY_INVALID", "keyExpired"];

/// Map a non-success HTTP response onto the error taxonomy.
///
/// Google reports the cause in `error.errors[].reason` and, on newer
/// endpoints, in `error.details[].reason`. Bodies that don't parse are
/// scanned for the same reason strings.
pub fn classify_error(status: u16, body: &str) -> YouTubeError {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
    let reasons: Vec<String> = envelope
        .as_ref()
        .map(|e| e.error.reasons())
        .unwrap_or_default();

    let has = |candidates: &[&str]| {
        candidates.iter().any(|c| {
            reasons.iter().any(|r| r == c) || (reasons.is_empty() && body.contains(c))
        })
    };

    if has(QUOTA_REASONS) {
        YouTubeError::QuotaExceeded
    } else if has(NOT_ENABLED_REASONS) {
        YouTubeError::ServiceNotEnabled
    } else if has(INVALID_KEY_REASONS) {
        YouTubeError::InvalidCredential
    } else {
        let message = envelope
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.trim().to_string());
        YouTubeError::Transient(format!("status {status}: {message}"))
    }
}
