use regex::Regex;
use std::sync::LazyLock;

// ── Regex patterns (compiled once) ──────────────────────────────

static RE_BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Marker followed by the id: `v=` query parameter, path prefixes, or the
/// `youtu.be` short-link host.
static RE_URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[?&#]v=|/watch/|/embed/|/shorts/|/live/|/v/|youtu\.be/)([A-Za-z0-9_-]{11})")
        .unwrap()
});

/// Whether `id` has the shape of a YouTube video id (11 URL-safe chars).
pub fn is_valid_id(id: &str) -> bool {
    RE_BARE_ID.is_match(id)
}

/// Extract a video id from a free-form reference.
///
/// Accepts a bare id or any of the usual URL shapes (`watch?v=`,
/// `youtu.be/`, `/embed/`, `/shorts/`, ...). Anything else yields `None`;
/// a missing reference is a normal state, not an error.
pub fn extract_id(reference: Option<&str>) -> Option<String> {
    let reference = reference?.trim();
    if reference.is_empty() {
        return None;
    }

    if is_valid_id(reference) {
        return Some(reference.to_string());
    }

    RE_URL_ID
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
