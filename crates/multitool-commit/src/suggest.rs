//! End-to-end commit suggestion
//!
//! Each step either hands its result to the next or ends the flow with a
//! user-facing text: git check, repository check, diff, summary, inference,
//! branch override, rules, rendering. Nothing here returns an error; every
//! failure becomes guidance text.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::git::{DiffMode, GitCli, find_repository};
use crate::infer::infer;
use crate::locale::Language;
use crate::message::{CommitContext, emoji_for, format_subject, render_conventional, render_template};
use crate::rules::CommitRules;
use crate::status::summarize;

pub const DEFAULT_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 10;

const CANDIDATE_SEPARATOR: &str = "\n\n---\n\n";

/// How much of git's stderr the debug block shows.
const DEBUG_STDERR_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct SuggestOptions {
    pub mode: DiffMode,
    /// Template rendered instead of the built-in Conventional Commits layout
    pub format: Option<String>,
    pub rules: CommitRules,
    pub language: Language,
    /// Clamped to `1..=10`
    pub suggestions: usize,
    pub breaking: bool,
    pub debug: bool,
    /// Directory to run git in; the process working directory when `None`
    pub path: Option<PathBuf>,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            mode: DiffMode::Staged,
            format: None,
            rules: CommitRules::default(),
            language: Language::default(),
            suggestions: DEFAULT_SUGGESTIONS,
            breaking: false,
            debug: false,
            path: None,
        }
    }
}

/// Resolve a caller-supplied directory against `base`.
///
/// On failure the candidate that was looked for is returned so it can be
/// shown to the caller.
pub fn resolve_directory(raw: &str, base: &Path) -> Result<PathBuf, PathBuf> {
    let candidate = base.join(raw);
    match dunce::canonicalize(&candidate) {
        Ok(resolved) if resolved.is_dir() => Ok(resolved),
        _ => Err(candidate),
    }
}

/// Collected diagnostics, rendered ahead of the response when enabled.
struct DebugTrail {
    enabled: bool,
    lines: Vec<String>,
}

impl DebugTrail {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    fn note(&mut self, line: String) {
        if self.enabled {
            self.lines.push(line);
        }
    }

    fn wrap(self, body: String) -> String {
        if !self.enabled {
            return body;
        }
        format!(
            "🔍 **Debug info**\n\n{}{CANDIDATE_SEPARATOR}{body}",
            self.lines.join("\n")
        )
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("(none)")
}

/// Suggest commit messages for the changes selected by `options`.
pub async fn suggest(git: &GitCli, options: &SuggestOptions) -> String {
    let lang = options.language;
    let mut trail = DebugTrail::new(options.debug);

    let process_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base = options.path.clone().unwrap_or_else(|| process_dir.clone());
    trail.note(format!("📂 Working directory: {}", process_dir.display()));
    trail.note(format!("🎯 Mode: {}", options.mode.name()));
    trail.note(format!("📌 Repository path: {}", base.display()));

    match git.version().await {
        Ok(version) => trail.note(format!("🔧 Git check: available ({version})")),
        Err(e) => {
            error!(code = e.code(), error = %e, "Git is unavailable");
            trail.note(format!("🔧 Git check: [{}] {e}", e.code()));
            return trail.wrap(lang.git_unavailable(&e.to_string()));
        }
    }

    match find_repository(&base) {
        Some(root) => trail.note(format!("📁 Repository check: found at {}", root.display())),
        None => {
            error!(code = 128, path = %base.display(), "Not a git repository");
            trail.note(format!(
                "📁 Repository check: [128] no .git at or above {}",
                base.display()
            ));
            return trail.wrap(lang.not_a_repository(&base.display().to_string()));
        }
    }

    let output = match git.diff_name_status(&base, &options.mode).await {
        Ok(output) => output,
        Err(e) => {
            error!(code = e.code(), error = %e, "git diff could not run");
            trail.note(format!("⚙️ Git diff: [{}] {e}", e.code()));
            return trail.wrap(lang.diff_failed(&e.to_string(), e.code()));
        }
    };
    trail.note(format!(
        "⚙️ Git diff: exit code={}, stdout={} bytes, stderr={}",
        output.code,
        output.stdout.len(),
        output.stderr.chars().take(DEBUG_STDERR_CHARS).collect::<String>()
    ));
    if !output.success() {
        warn!(code = output.code, stderr = %output.stderr.trim(), "git diff failed");
        return trail.wrap(lang.diff_failed(output.stderr.trim(), output.code));
    }

    let summary = summarize(output.stdout.lines());
    trail.note(format!(
        "📊 Changes: added={}, modified={}, deleted={}, renamed={}",
        summary.stats.added, summary.stats.modified, summary.stats.deleted, summary.stats.renamed
    ));
    if summary.is_empty() {
        return trail.wrap(format!("ℹ️ {}", lang.no_changes_hint()));
    }

    let inferred = infer(&summary.changes);
    let branch = git.current_branch(&base).await;
    trail.note(format!("🌿 Branch: {}", or_none(branch.as_deref())));
    trail.note(format!(
        "🎨 Inferred: type={}, scope={}",
        inferred.commit_type,
        or_none(inferred.scope.as_deref())
    ));

    let inferred = match &branch {
        Some(name) => inferred.with_branch(name),
        None => inferred,
    };
    let (commit_type, scope) = options.rules.enforce(&inferred.commit_type, inferred.scope);
    trail.note(format!(
        "✅ Final: type={commit_type}, scope={}",
        or_none(scope.as_deref())
    ));

    let body = lang.body_lines(&summary.stats, &summary.key_paths());
    let emoji = emoji_for(&commit_type);
    let subject_emoji = options.rules.allow_emoji().then_some(emoji);
    let subject_max = options.rules.subject_max();
    let count = options.suggestions.clamp(1, MAX_SUGGESTIONS);

    let messages: Vec<String> = lang
        .subject_templates(&commit_type)
        .iter()
        .take(count)
        .map(|template| {
            let context = CommitContext {
                commit_type: commit_type.clone(),
                scope: scope.clone(),
                subject: format_subject(template, subject_emoji, subject_max),
                body: body.clone(),
                emoji: emoji.to_string(),
                branch: branch.clone(),
                files_changed: summary.len(),
                files_added: summary.stats.added,
                files_modified: summary.stats.modified,
                files_deleted: summary.stats.deleted,
            };
            match &options.format {
                Some(format) => render_template(format, &context),
                None => render_conventional(&context, options.breaking, lang),
            }
        })
        .collect();

    debug!(count = messages.len(), commit_type = %commit_type, "Rendered commit suggestions");

    let text = if let [only] = messages.as_slice() {
        only.clone()
    } else {
        messages
            .iter()
            .enumerate()
            .map(|(i, message)| format!("[{}]\n{message}", i + 1))
            .collect::<Vec<_>>()
            .join(CANDIDATE_SEPARATOR)
    };
    trail.wrap(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_directory_relative() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();

        let resolved = resolve_directory("sub", temp.path()).unwrap();
        assert!(resolved.ends_with("sub"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_directory_rejects_missing_and_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("file.txt"), "x").unwrap();

        assert!(resolve_directory("nope", temp.path()).is_err());
        assert!(resolve_directory("file.txt", temp.path()).is_err());
    }

    #[test]
    fn test_debug_trail_disabled_is_transparent() {
        let mut trail = DebugTrail::new(false);
        trail.note("ignored".to_string());
        assert_eq!(trail.wrap("body".to_string()), "body");
    }

    #[test]
    fn test_debug_trail_prepends_block() {
        let mut trail = DebugTrail::new(true);
        trail.note("one".to_string());
        trail.note("two".to_string());
        assert_eq!(
            trail.wrap("body".to_string()),
            "🔍 **Debug info**\n\none\ntwo\n\n---\n\nbody"
        );
    }

    #[tokio::test]
    async fn test_missing_git_returns_remediation() {
        let git = GitCli::new("definitely-not-a-real-git-binary-7f3a");
        let text = suggest(&git, &SuggestOptions::default()).await;
        assert!(text.starts_with("❌ Git 설정 문제"));
        assert!(text.contains("https://git-scm.com/"));
    }

    #[tokio::test]
    async fn test_missing_git_debug_shows_marker() {
        let git = GitCli::new("definitely-not-a-real-git-binary-7f3a");
        let options = SuggestOptions {
            debug: true,
            language: Language::En,
            ..Default::default()
        };
        let text = suggest(&git, &options).await;
        assert!(text.starts_with("🔍 **Debug info**"));
        assert!(text.contains("[127]"));
        assert!(text.contains("❌ Git setup problem"));
    }
}
