//! YouTube transcript summary tool

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use multitool_transcript::{
    TranscriptSource, extract_video_id, fetch_transcript, group_digits, sectionize,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ToolDescriptor, ToolHandler, ToolResult, invalid_arguments, parse_arguments};
use crate::Result;

pub const NAME: &str = "summarize_youtube";

pub const MIN_URL_LENGTH: usize = 10;
pub const DEFAULT_MAX_SUMMARY_LENGTH: i64 = 1000;
pub const MIN_SUMMARY_LENGTH: i64 = 200;
pub const MAX_SUMMARY_LENGTH: i64 = 5000;

static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z-]+$").unwrap());

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Fetch the transcript of a YouTube video and return a beginning/middle/end \
         summary together with basic statistics (duration, language, length).",
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "YouTube video URL (watch, youtu.be, shorts or embed link)",
                    "minLength": MIN_URL_LENGTH,
                    "examples": [
                        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                        "https://youtu.be/dQw4w9WgXcQ"
                    ]
                },
                "language": {
                    "type": "string",
                    "description": "Caption language code (e.g. ko, en, ja)",
                    "pattern": "^[A-Za-z-]+$",
                    "examples": ["ko", "en", "ja", "en-US"]
                },
                "max_summary_length": {
                    "type": "integer",
                    "description": "Maximum summary length in characters (200-5000)",
                    "minimum": MIN_SUMMARY_LENGTH,
                    "maximum": MAX_SUMMARY_LENGTH,
                    "default": DEFAULT_MAX_SUMMARY_LENGTH
                }
            },
            "required": ["url"],
            "additionalProperties": false,
            "examples": [{
                "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "language": "ko",
                "max_summary_length": 1200
            }]
        }),
    )
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SummarizeArgs {
    url: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    max_summary_length: Option<i64>,
}

/// Trim and lowercase a language code; blank means no preference.
pub(crate) fn normalize_language(raw: Option<&str>) -> std::result::Result<Option<String>, String> {
    let Some(code) = raw.map(str::trim).filter(|code| !code.is_empty()) else {
        return Ok(None);
    };
    if !LANGUAGE_CODE.is_match(code) {
        return Err(format!("language must match ^[A-Za-z-]+$: {code}"));
    }
    Ok(Some(code.to_lowercase()))
}

fn summary_limit(requested: Option<i64>) -> usize {
    requested
        .unwrap_or(DEFAULT_MAX_SUMMARY_LENGTH)
        .clamp(MIN_SUMMARY_LENGTH, MAX_SUMMARY_LENGTH) as usize
}

pub struct SummarizeYoutube {
    source: Arc<dyn TranscriptSource>,
}

impl SummarizeYoutube {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ToolHandler for SummarizeYoutube {
    async fn call(&self, arguments: Value) -> Result<ToolResult> {
        let args: SummarizeArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(invalid_arguments(e)),
        };
        let url = args.url.trim();
        if url.chars().count() < MIN_URL_LENGTH {
            return Ok(invalid_arguments(format!(
                "url must be at least {MIN_URL_LENGTH} characters"
            )));
        }
        let language = match normalize_language(args.language.as_deref()) {
            Ok(language) => language,
            Err(message) => return Ok(invalid_arguments(message)),
        };
        let max_len = summary_limit(args.max_summary_length);

        let Some(video_id) = extract_video_id(url) else {
            return Ok(ToolResult::text(
                "❌ Not a valid YouTube URL. Example: https://youtu.be/<VIDEO_ID>",
            ));
        };

        let transcript =
            fetch_transcript(self.source.as_ref(), &video_id, language.as_deref()).await;
        if transcript.is_empty() {
            return Ok(ToolResult::text(
                "❌ No transcript available. Try another language code (e.g. ko, en, ja) \
                 or check whether auto-generated captions exist.",
            ));
        }

        let summary = sectionize(&transcript.full_text, max_len);
        let text = format!(
            "📊 **Video info**\n\
             - Video ID: {video_id}\n\
             - Duration: {duration}\n\
             - Captions used: {language}\n\
             - Full text: {chars} characters\n\
             - Words: {words}\n\
             - Caption segments: {segments}\n\
             - Summary limit: {limit} characters\n\n\
             📝 **Transcript summary**\n{summary}\n\n\
             💡 **Tips**\n\
             - Lower `max_summary_length` for a shorter summary.\n\
             - Set `language` (e.g. 'ko', 'en-US') to pick a specific caption track.\n",
            duration = transcript.duration_label,
            language = transcript.language_used.as_deref().unwrap_or("unknown"),
            chars = group_digits(transcript.char_count()),
            words = group_digits(transcript.word_count()),
            segments = group_digits(transcript.entries.len()),
            limit = group_digits(max_len),
        );
        Ok(ToolResult::text(text))
    }
}
