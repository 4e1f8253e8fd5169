//! HTTP-backed transcript source
//!
//! The watch page embeds the player response, whose `captionTracks` array
//! lists every caption track with a signed `baseUrl`. The selected track is
//! downloaded as timed-text XML and parsed into [`Snippet`] records.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{RawRecord, Snippet};
use crate::source::{TrackInfo, TranscriptSource, select_track};

/// Default origin for watch pages.
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

static TEXT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").unwrap());

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_]+)="([^"]*)""#).unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z]+);").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// One entry of the player response's `captionTracks` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn info(&self) -> TrackInfo {
        TrackInfo {
            language_code: self.language_code.clone(),
            generated: self.kind.as_deref() == Some("asr"),
        }
    }
}

/// Production [`TranscriptSource`] talking to the video site over HTTPS.
#[derive(Debug, Clone)]
pub struct YouTubeSource {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeSource {
    /// Create a source whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the source at a different origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, url: &str, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::VideoUnavailable {
                video_id: video_id.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

#[async_trait]
impl TranscriptSource for YouTubeSource {
    async fn fetch(&self, video_id: &str, languages: Option<&[String]>) -> Result<Vec<RawRecord>> {
        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        let page = self.get_text(&watch_url, video_id).await?;

        let tracks = parse_caption_tracks(&page)?;
        if tracks.is_empty() {
            return Err(Error::TranscriptsDisabled {
                video_id: video_id.to_string(),
            });
        }

        let infos: Vec<TrackInfo> = tracks.iter().map(CaptionTrack::info).collect();
        let Some(index) = select_track(&infos, languages) else {
            return Err(Error::NoTranscriptFound {
                video_id: video_id.to_string(),
                languages: languages.map(<[String]>::to_vec).unwrap_or_default(),
            });
        };

        let track = &tracks[index];
        debug!(
            video_id,
            language = %track.language_code,
            generated = infos[index].generated,
            "Downloading caption track"
        );

        let track_url = self.absolute(&track.base_url.replace("&fmt=srv3", ""));
        let xml = self.get_text(&track_url, video_id).await?;
        Ok(parse_timed_text(&xml)
            .into_iter()
            .map(RawRecord::Snippet)
            .collect())
    }
}

/// Pull the `captionTracks` array out of a watch page.
///
/// A page without the key has no captions; an empty list is returned.
fn parse_caption_tracks(page: &str) -> Result<Vec<CaptionTrack>> {
    let Some(position) = page.find(CAPTION_TRACKS_KEY) else {
        return Ok(Vec::new());
    };
    let rest = &page[position + CAPTION_TRACKS_KEY.len()..];

    // The array is followed by the rest of the player response; read one
    // value and ignore whatever comes after it.
    serde_json::Deserializer::from_str(rest)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or_else(|| Error::Parse("captionTracks has no value".to_string()))?
        .map_err(Error::from)
}

/// Parse timed-text XML into snippets.
fn parse_timed_text(xml: &str) -> Vec<Snippet> {
    TEXT_ELEMENT
        .captures_iter(xml)
        .map(|caps| {
            let mut start = 0.0;
            let mut duration = 0.0;
            for attr in ATTRIBUTE.captures_iter(&caps[1]) {
                match &attr[1] {
                    "start" => start = attr[2].parse().unwrap_or(0.0),
                    "dur" => duration = attr[2].parse().unwrap_or(0.0),
                    _ => {}
                }
            }
            // Caption text arrives entity-encoded twice.
            let text = unescape(&unescape(&caps[2]));
            let text = TAG.replace_all(&text, "");
            Snippet::new(text.trim(), start, duration)
        })
        .collect()
}

fn unescape(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16).ok())
                    .unwrap_or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
