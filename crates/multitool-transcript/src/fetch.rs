//! Language fallback chain
//!
//! Transcripts are requested from a [`TranscriptSource`] one attempt at a
//! time until one succeeds:
//!
//! | requested | attempts |
//! |---|---|
//! | `lang` | `[lang]`, `[lang-auto, lang]` |
//! | nothing | `[ko]`, `[ko-auto]`, `[en]`, `[en-US, en-GB]`, `[ja]`, `[ja-auto]`, default track |
//!
//! Failures never reach the caller: an exhausted chain yields an empty
//! [`FetchedTranscript`] and a log line.

use tracing::{debug, error, warn};

use crate::record::TranscriptEntry;
use crate::source::{AUTO_SUFFIX, TranscriptSource};

/// Duration label used when there is nothing to measure.
pub const UNKNOWN_DURATION: &str = "unknown";

/// Normalized outcome of the fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTranscript {
    pub entries: Vec<TranscriptEntry>,
    /// Human-readable label of the attempt that succeeded
    pub language_used: Option<String>,
    /// `"{m}m {s}s"` from the end of the last entry, or [`UNKNOWN_DURATION`]
    pub duration_label: String,
    /// Entry texts joined by single spaces
    pub full_text: String,
}

impl FetchedTranscript {
    fn not_found() -> Self {
        Self {
            entries: Vec::new(),
            language_used: None,
            duration_label: UNKNOWN_DURATION.to_string(),
            full_text: String::new(),
        }
    }

    fn from_entries(entries: Vec<TranscriptEntry>, label: String) -> Self {
        let full_text = entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let duration_label = entries
            .last()
            .map(|last| format_duration(last.start + last.duration))
            .unwrap_or_else(|| UNKNOWN_DURATION.to_string());

        Self {
            entries,
            language_used: Some(label),
            duration_label,
            full_text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of whitespace-separated words in the full text.
    pub fn word_count(&self) -> usize {
        self.full_text.split_whitespace().count()
    }

    /// Length of the full text in characters.
    pub fn char_count(&self) -> usize {
        self.full_text.chars().count()
    }
}

/// What to do when an attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnFailure {
    /// Try the next attempt quietly
    Continue,
    /// Give up and report that nothing is available
    Abort,
}

#[derive(Debug, Clone)]
struct Attempt {
    /// `None` requests the source's default track
    languages: Option<Vec<String>>,
    label: String,
    on_failure: OnFailure,
}

impl Attempt {
    fn new(languages: &[&str], label: impl Into<String>) -> Self {
        Self {
            languages: Some(languages.iter().map(|code| code.to_string()).collect()),
            label: label.into(),
            on_failure: OnFailure::Continue,
        }
    }

    fn default_track() -> Self {
        Self {
            languages: None,
            label: "Default language".to_string(),
            on_failure: OnFailure::Abort,
        }
    }
}

fn attempts(language: Option<&str>) -> Vec<Attempt> {
    match language {
        Some(lang) => {
            let auto = format!("{lang}{AUTO_SUFFIX}");
            vec![
                Attempt::new(&[lang], lang),
                Attempt::new(&[auto.as_str(), lang], format!("{lang} (auto-generated)")),
            ]
        }
        None => vec![
            Attempt::new(&["ko"], "Korean"),
            Attempt::new(&["ko-auto"], "Korean (auto-generated)"),
            Attempt::new(&["en"], "English"),
            Attempt::new(&["en-US", "en-GB"], "English"),
            Attempt::new(&["ja"], "Japanese"),
            Attempt::new(&["ja-auto"], "Japanese (auto-generated)"),
            Attempt::default_track(),
        ],
    }
}

/// Fetch the transcript of `video_id`, walking the fallback chain.
///
/// A blank `language` is treated as no preference. An attempt that returns
/// zero records counts as a failure.
pub async fn fetch_transcript(
    source: &dyn TranscriptSource,
    video_id: &str,
    language: Option<&str>,
) -> FetchedTranscript {
    let language = language.map(str::trim).filter(|lang| !lang.is_empty());

    for attempt in attempts(language) {
        match source.fetch(video_id, attempt.languages.as_deref()).await {
            Ok(records) if !records.is_empty() => {
                debug!(video_id, language = %attempt.label, segments = records.len(), "Transcript fetched");
                let entries = records.iter().map(TranscriptEntry::from_record).collect();
                return FetchedTranscript::from_entries(entries, attempt.label);
            }
            Ok(_) => {
                debug!(video_id, language = %attempt.label, "Transcript attempt returned no segments");
                if attempt.on_failure == OnFailure::Abort {
                    error!(video_id, "No transcript available: default track is empty");
                    break;
                }
            }
            Err(e) => match attempt.on_failure {
                OnFailure::Continue => {
                    debug!(video_id, language = %attempt.label, error = %e, "Transcript attempt failed");
                }
                OnFailure::Abort => {
                    error!(video_id, error = %e, "No transcript available");
                    break;
                }
            },
        }
    }

    if language.is_some() {
        warn!(video_id, language, "No transcript in requested language");
    }
    FetchedTranscript::not_found()
}

/// Format seconds as `"{m}m {s}s"`, truncating fractions.
fn format_duration(total_secs: f64) -> String {
    let total = if total_secs.is_finite() && total_secs > 0.0 {
        total_secs as u64
    } else {
        0
    };
    format!("{}m {}s", total / 60, total % 60)
}
