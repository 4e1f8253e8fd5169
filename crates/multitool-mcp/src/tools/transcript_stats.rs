//! Transcript statistics tool

use std::sync::Arc;

use async_trait::async_trait;
use multitool_transcript::{TranscriptSource, extract_video_id, fetch_transcript};
use serde::Deserialize;
use serde_json::{Value, json};

use super::summarize_youtube::normalize_language;
use super::{ToolDescriptor, ToolHandler, ToolResult, invalid_arguments, parse_arguments};
use crate::Result;

pub const NAME: &str = "transcript_stats";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Fetch the transcript of a YouTube video and return only its statistics \
         (language, segment count, text length, estimated duration).",
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "YouTube video URL"
                },
                "language": {
                    "type": "string",
                    "description": "Caption language code (e.g. ko, en, ja)",
                    "pattern": "^[A-Za-z-]+$",
                    "examples": ["ko", "en", "ja", "en-US"]
                }
            },
            "required": ["url"]
        }),
    )
}

/// Open schema: extra fields are ignored.
#[derive(Debug, Deserialize)]
struct StatsArgs {
    url: String,
    #[serde(default)]
    language: Option<String>,
}

pub struct TranscriptStats {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptStats {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ToolHandler for TranscriptStats {
    async fn call(&self, arguments: Value) -> Result<ToolResult> {
        let args: StatsArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(invalid_arguments(e)),
        };
        let language = match normalize_language(args.language.as_deref()) {
            Ok(language) => language,
            Err(message) => return Ok(invalid_arguments(message)),
        };

        let Some(video_id) = extract_video_id(args.url.trim()) else {
            return Ok(ToolResult::text("❌ Not a valid YouTube URL."));
        };

        let transcript =
            fetch_transcript(self.source.as_ref(), &video_id, language.as_deref()).await;
        if transcript.is_empty() {
            return Ok(ToolResult::text("❌ No transcript found."));
        }

        Ok(ToolResult::text(format!(
            "📊 Stats\n\
             - Language: {}\n\
             - Segments: {}\n\
             - Text length: {} characters\n\
             - Estimated duration: {}\n",
            transcript.language_used.as_deref().unwrap_or("unknown"),
            transcript.entries.len(),
            transcript.char_count(),
            transcript.duration_label,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multitool_transcript::{RawRecord, StaticSource, StaticTrack};
    use pretty_assertions::assert_eq;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map.into(),
            other => panic!("not an object: {other}"),
        }
    }

    #[tokio::test]
    async fn test_stats_output() {
        let source = StaticSource::new().with_track(StaticTrack::generated(
            "ko",
            vec![
                record(json!({"text": "안녕하세요", "start": 0.0, "duration": 3.0})),
                record(json!({"text": "반갑습니다", "start": 3.0, "duration": 4.0})),
            ],
        ));
        let tool = TranscriptStats::new(Arc::new(source));

        let result = tool
            .call(json!({"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "note": "ignored"}))
            .await
            .unwrap();

        assert_eq!(
            result.first_text().unwrap(),
            "📊 Stats\n\
             - Language: Korean (auto-generated)\n\
             - Segments: 2\n\
             - Text length: 11 characters\n\
             - Estimated duration: 0m 7s\n"
        );
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let tool = TranscriptStats::new(Arc::new(StaticSource::new()));
        let result = tool.call(json!({"url": "not a url"})).await.unwrap();
        assert_eq!(result.first_text(), Some("❌ Not a valid YouTube URL."));
    }

    #[tokio::test]
    async fn test_no_transcript() {
        let tool = TranscriptStats::new(Arc::new(StaticSource::new()));
        let result = tool
            .call(json!({"url": "https://youtu.be/dQw4w9WgXcQ"}))
            .await
            .unwrap();
        assert_eq!(result.first_text(), Some("❌ No transcript found."));
    }

    #[tokio::test]
    async fn test_missing_url() {
        let tool = TranscriptStats::new(Arc::new(StaticSource::new()));
        let result = tool.call(Value::Null).await.unwrap();
        assert!(result.first_text().unwrap().starts_with("❌ Invalid arguments:"));
    }

    #[test]
    fn test_schema_advertises_language_pattern() {
        let schema = descriptor().input_schema;
        assert_eq!(schema["properties"]["language"]["pattern"], "^[A-Za-z-]+$");
    }

    #[tokio::test]
    async fn test_language_outside_pattern_is_rejected() {
        let tool = TranscriptStats::new(Arc::new(StaticSource::new()));
        let result = tool
            .call(json!({"url": "https://youtu.be/dQw4w9WgXcQ", "language": "en_US"}))
            .await
            .unwrap();
        assert!(result.first_text().unwrap().starts_with("❌ Invalid arguments:"));
    }
}
