//! Video identifier extraction

use std::sync::LazyLock;

use regex::Regex;

/// Known URL shapes, tried in order. Each captures an 11-character id.
///
/// - `watch?v=ID` and `/ID` path segments
/// - `embed/ID`
/// - `youtu.be/ID`
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
        r"embed/([0-9A-Za-z_-]{11})",
        r"youtu\.be/([0-9A-Za-z_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract the 11-character video id from a video URL.
///
/// Returns `None` when no known URL shape matches.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
