//! Conventional Commits suggestion tool

use std::path::PathBuf;

use async_trait::async_trait;
use multitool_commit::suggest::{DEFAULT_SUGGESTIONS, MAX_SUGGESTIONS};
use multitool_commit::{
    CommitRules, DEFAULT_TYPES, DiffMode, GitCli, Language, SuggestOptions, resolve_directory,
    suggest,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ToolDescriptor, ToolHandler, ToolResult, invalid_arguments, parse_arguments};
use crate::Result;

pub const NAME: &str = "commit_suggester";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Inspect git changes (staged, working tree or a commit range) and suggest \
         Conventional Commits messages. Type and scope are inferred from the changed \
         paths and the branch name.",
        json!({
            "type": "object",
            "properties": {
                "mode": {
                    "type": "string",
                    "enum": ["staged", "working", "range"],
                    "default": "staged",
                    "description": "Which changes to inspect"
                },
                "range": {
                    "type": "string",
                    "description": "Commit range, required when mode is 'range'",
                    "examples": ["HEAD~3..HEAD", "main..feature/login"]
                },
                "format": {
                    "type": "string",
                    "description": "Output template. Placeholders: {type} {scope} \
                                    {scope_with_parens} {subject} {body} {emoji} {branch} \
                                    {files_changed} {files_added} {files_modified} {files_deleted}",
                    "examples": ["{type}{scope_with_parens}: {subject}"]
                },
                "rules": {
                    "type": "object",
                    "properties": {
                        "types": {
                            "type": "array",
                            "items": {"type": "string"},
                            "default": DEFAULT_TYPES
                        },
                        "require_scope": {"type": "boolean", "default": false},
                        "subject_max": {
                            "type": "integer",
                            "minimum": 10,
                            "maximum": 120,
                            "default": 72
                        },
                        "allow_emoji": {"type": "boolean", "default": false},
                        "scope_enum": {
                            "type": "array",
                            "items": {"type": "string"}
                        }
                    },
                    "additionalProperties": false
                },
                "language": {
                    "type": "string",
                    "enum": ["ko", "en"],
                    "default": "ko",
                    "description": "Language of subjects, bodies and guidance"
                },
                "suggestions": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_SUGGESTIONS,
                    "default": DEFAULT_SUGGESTIONS
                },
                "breaking": {
                    "type": "boolean",
                    "default": false,
                    "description": "Mark as a breaking change"
                },
                "debug": {
                    "type": "boolean",
                    "default": false,
                    "description": "Prepend diagnostic information"
                },
                "path": {
                    "type": "string",
                    "description": "Repository directory; relative paths resolve against the \
                                    server's working directory"
                }
            },
            "additionalProperties": false
        }),
    )
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModeArg {
    #[default]
    Staged,
    Working,
    Range,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuggestArgs {
    #[serde(default)]
    mode: ModeArg,
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    rules: CommitRules,
    #[serde(default)]
    language: Language,
    #[serde(default)]
    suggestions: Option<i64>,
    #[serde(default)]
    breaking: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    path: Option<String>,
}

/// Missing or zero means the default; anything else is clamped.
fn suggestion_count(requested: Option<i64>) -> usize {
    match requested {
        None | Some(0) => DEFAULT_SUGGESTIONS,
        Some(n) => n.clamp(1, MAX_SUGGESTIONS as i64) as usize,
    }
}

/// Turn validated arguments into options, or the text to answer with.
fn build_options(args: SuggestArgs) -> std::result::Result<SuggestOptions, String> {
    let lang = args.language;
    let mode = match args.mode {
        ModeArg::Staged => DiffMode::Staged,
        ModeArg::Working => DiffMode::Working,
        ModeArg::Range => match args.range.as_deref().map(str::trim) {
            None | Some("") => return Err(lang.missing_range().to_string()),
            Some(range) if range.starts_with('-') => return Err(lang.invalid_range(range)),
            Some(range) => DiffMode::Range(range.to_string()),
        },
    };

    let path = match args.path.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            match resolve_directory(raw, &base) {
                Ok(dir) => Some(dir),
                Err(candidate) => return Err(lang.invalid_path(&candidate.display().to_string())),
            }
        }
    };

    Ok(SuggestOptions {
        mode,
        format: args.format.filter(|format| !format.is_empty()),
        rules: args.rules,
        language: lang,
        suggestions: suggestion_count(args.suggestions),
        breaking: args.breaking,
        debug: args.debug,
        path,
    })
}

pub struct CommitSuggester {
    git: GitCli,
}

impl CommitSuggester {
    pub fn new(git: GitCli) -> Self {
        Self { git }
    }
}

#[async_trait]
impl ToolHandler for CommitSuggester {
    async fn call(&self, arguments: Value) -> Result<ToolResult> {
        let args: SuggestArgs = match parse_arguments(arguments) {
            Ok(args) => args,
            Err(e) => return Ok(invalid_arguments(e)),
        };
        let options = match build_options(args) {
            Ok(options) => options,
            Err(text) => return Ok(ToolResult::text(text)),
        };
        tracing::debug!(
            mode = options.mode.name(),
            language = %options.language,
            suggestions = options.suggestions,
            "Suggesting commit messages"
        );
        Ok(ToolResult::text(suggest(&self.git, &options).await))
    }
}
