//! Error types for transcript fetching

/// Result type alias for transcript operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a [`TranscriptSource`](crate::TranscriptSource) can report.
///
/// None of these escape [`fetch_transcript`](crate::fetch_transcript); the
/// fallback chain turns them into the next attempt or an empty result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure talking to the transcript service
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The watch page could not be loaded
    #[error("video {video_id} is unavailable (HTTP {status})")]
    VideoUnavailable { video_id: String, status: u16 },

    /// The video exists but publishes no caption tracks at all
    #[error("transcripts are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    /// Caption tracks exist, but none match the requested languages
    #[error("no transcript for video {video_id} in languages {languages:?}")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
    },

    /// The service answered with data we could not understand
    #[error("malformed caption data: {0}")]
    Parse(String),

    /// JSON decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
