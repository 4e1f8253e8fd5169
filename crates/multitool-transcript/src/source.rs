//! The transcript source seam
//!
//! A [`TranscriptSource`] returns the raw caption records of one track of a
//! video. Which track is chosen follows [`select_track`] for every source, so
//! the in-memory [`StaticSource`] behaves like the network-backed one.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::record::RawRecord;

/// Suffix that requests the auto-generated track of a language.
pub const AUTO_SUFFIX: &str = "-auto";

/// Provider of caption tracks for a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the records of the first track matching `languages`.
    ///
    /// `None` asks for the video's default track. Codes are tried in order;
    /// a code ending in `-auto` matches only an auto-generated track of the
    /// base language, a plain code only a manually created one.
    async fn fetch(&self, video_id: &str, languages: Option<&[String]>) -> Result<Vec<RawRecord>>;
}

/// What a source knows about an available caption track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub language_code: String,
    pub generated: bool,
}

impl TrackInfo {
    fn matches(&self, requested: &str) -> bool {
        let (code, want_generated) = match requested.strip_suffix(AUTO_SUFFIX) {
            Some(base) => (base, true),
            None => (requested, false),
        };
        self.generated == want_generated && self.language_code.eq_ignore_ascii_case(code)
    }
}

/// Pick the index of the track to fetch.
///
/// With `languages`, the first code (in request order) that matches any track
/// wins. Without, the first manually created track is preferred, then the
/// first track of any kind.
pub fn select_track(tracks: &[TrackInfo], languages: Option<&[String]>) -> Option<usize> {
    match languages {
        Some(codes) => codes
            .iter()
            .find_map(|code| tracks.iter().position(|track| track.matches(code))),
        None => tracks
            .iter()
            .position(|track| !track.generated)
            .or_else(|| (!tracks.is_empty()).then_some(0)),
    }
}

/// One caption track held in memory.
#[derive(Debug, Clone)]
pub struct StaticTrack {
    pub language_code: String,
    pub generated: bool,
    pub records: Vec<RawRecord>,
}

impl StaticTrack {
    /// A manually created track.
    pub fn manual(language_code: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            language_code: language_code.into(),
            generated: false,
            records,
        }
    }

    /// An auto-generated track.
    pub fn generated(language_code: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            language_code: language_code.into(),
            generated: true,
            records,
        }
    }

    fn info(&self) -> TrackInfo {
        TrackInfo {
            language_code: self.language_code.clone(),
            generated: self.generated,
        }
    }
}

/// In-memory [`TranscriptSource`] serving the same tracks for every video.
///
/// Every request is recorded so callers can assert the order in which
/// languages were tried.
#[derive(Debug, Default)]
pub struct StaticSource {
    tracks: Vec<StaticTrack>,
    unavailable: bool,
    requests: Mutex<Vec<Option<Vec<String>>>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(mut self, track: StaticTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Make every fetch fail as if the video did not exist.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Language lists requested so far, oldest first.
    pub fn requests(&self) -> Vec<Option<Vec<String>>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranscriptSource for StaticSource {
    async fn fetch(&self, video_id: &str, languages: Option<&[String]>) -> Result<Vec<RawRecord>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(languages.map(<[String]>::to_vec));
        }

        if self.unavailable {
            return Err(Error::VideoUnavailable {
                video_id: video_id.to_string(),
                status: 404,
            });
        }
        if self.tracks.is_empty() {
            return Err(Error::TranscriptsDisabled {
                video_id: video_id.to_string(),
            });
        }

        let infos: Vec<TrackInfo> = self.tracks.iter().map(StaticTrack::info).collect();
        select_track(&infos, languages)
            .map(|index| self.tracks[index].records.clone())
            .ok_or_else(|| Error::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: languages.map(<[String]>::to_vec).unwrap_or_default(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn track(code: &str, generated: bool) -> TrackInfo {
        TrackInfo {
            language_code: code.to_string(),
            generated,
        }
    }

    fn codes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[rstest]
    #[case(&["ko"], Some(1))]
    #[case(&["ko-auto"], Some(0))]
    #[case(&["KO"], Some(1))]
    #[case(&["en-US", "en-GB"], Some(3))]
    #[case(&["ja"], None)]
    #[case(&["ja-auto"], Some(4))]
    #[case(&["fr", "ko"], Some(1))]
    fn selects_requested_track(#[case] requested: &[&str], #[case] expected: Option<usize>) {
        let tracks = vec![
            track("ko", true),
            track("ko", false),
            track("en", false),
            track("en-GB", false),
            track("ja", true),
        ];
        assert_eq!(select_track(&tracks, Some(&codes(requested))), expected);
    }

    #[test]
    fn default_prefers_manual_track() {
        let tracks = vec![track("ja", true), track("fr", false)];
        assert_eq!(select_track(&tracks, None), Some(1));
    }

    #[test]
    fn default_falls_back_to_generated_track() {
        let tracks = vec![track("ja", true)];
        assert_eq!(select_track(&tracks, None), Some(0));
        assert_eq!(select_track(&[], None), None);
    }

    #[tokio::test]
    async fn static_source_reports_disabled_and_missing() {
        let empty = StaticSource::new();
        assert!(matches!(
            empty.fetch("abc", None).await,
            Err(Error::TranscriptsDisabled { .. })
        ));

        let source = StaticSource::new().with_track(StaticTrack::manual("en", vec![]));
        assert!(matches!(
            source.fetch("abc", Some(&codes(&["ko"]))).await,
            Err(Error::NoTranscriptFound { .. })
        ));
        assert_eq!(source.requests(), vec![Some(codes(&["ko"]))]);
    }
}
