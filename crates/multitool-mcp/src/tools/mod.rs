//! MCP Tool definitions and handlers
//!
//! Each submodule owns one tool: its descriptor (name, description, input
//! schema) and the handler that runs it.

pub mod commit_suggester;
pub mod ping;
pub mod summarize_youtube;
pub mod transcript_stats;

use std::sync::Arc;

use async_trait::async_trait;
use multitool_commit::GitCli;
use multitool_transcript::TranscriptSource;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::ToolRegistry;
use crate::{Error, Result};

/// Tool metadata advertised through `tools/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content item in a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// Text of the first content item, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|ToolContent::Text { text }| text.as_str())
    }

    /// Length of the first text item in characters.
    pub fn text_chars(&self) -> usize {
        self.first_text().map_or(0, |text| text.chars().count())
    }
}

/// Something that can run a tool call.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Value) -> Result<ToolResult>;
}

/// Decode tool arguments; a missing argument object counts as empty.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
        message: e.to_string(),
    })
}

/// Text returned to the caller when arguments fail validation.
pub(crate) fn invalid_arguments(message: impl std::fmt::Display) -> ToolResult {
    ToolResult::text(format!("❌ Invalid arguments: {message}"))
}

/// Build the registry with every built-in tool.
pub fn builtin_registry(source: Arc<dyn TranscriptSource>, git: GitCli) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(
        summarize_youtube::descriptor(),
        Arc::new(summarize_youtube::SummarizeYoutube::new(source.clone())),
    )?;
    registry.register(
        transcript_stats::descriptor(),
        Arc::new(transcript_stats::TranscriptStats::new(source)),
    )?;
    registry.register(ping::descriptor(), Arc::new(ping::Ping))?;
    registry.register(
        commit_suggester::descriptor(),
        Arc::new(commit_suggester::CommitSuggester::new(git)),
    )?;
    Ok(registry)
}
