//! Commit message rendering

use crate::locale::Language;

/// Everything a rendered commit message may refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitContext {
    pub commit_type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Vec<String>,
    /// Emoji for the type, whether or not the subject carries it
    pub emoji: String,
    pub branch: Option<String>,
    pub files_changed: usize,
    pub files_added: usize,
    pub files_modified: usize,
    pub files_deleted: usize,
}

impl CommitContext {
    fn scope_with_parens(&self) -> String {
        self.scope
            .as_deref()
            .map(|scope| format!("({scope})"))
            .unwrap_or_default()
    }
}

/// Emoji for a commit type.
pub fn emoji_for(commit_type: &str) -> &'static str {
    match commit_type {
        "feat" => "✨",
        "fix" => "🐛",
        "docs" => "📝",
        "refactor" => "♻️",
        "test" => "✅",
        "build" => "🏗️",
        "perf" => "🚀",
        "chore" => "🧹",
        "ci" => "🔧",
        "style" => "💄",
        _ => "📝",
    }
}

/// Trim and cut `text` to at most `max_len` characters, ending in `…` when cut.
pub fn truncate_subject(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_len.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Build a subject from a template, prefixing the emoji when given.
pub fn format_subject(template: &str, emoji: Option<&str>, max_len: usize) -> String {
    let subject = match emoji {
        Some(emoji) => format!("{emoji} {template}"),
        None => template.to_string(),
    };
    truncate_subject(&subject, max_len)
}

/// Render a Conventional Commits message: header, optional body, optional
/// breaking-change footer, separated by blank lines.
pub fn render_conventional(context: &CommitContext, breaking: bool, language: Language) -> String {
    let mut lines = vec![format!(
        "{}{}: {}",
        context.commit_type,
        context.scope_with_parens(),
        context.subject
    )];

    if !context.body.is_empty() {
        lines.push(String::new());
        lines.extend(context.body.iter().cloned());
    }
    if breaking {
        lines.push(String::new());
        lines.push(language.breaking_footer().to_string());
    }

    lines.join("\n")
}

/// Render a caller-supplied template.
///
/// Placeholders are replaced one after another in a fixed order, so a value
/// that itself contains a later placeholder is substituted again. Unknown
/// placeholders are left as written. Literal `\n` and `\t` sequences become
/// a newline and a tab afterwards.
pub fn render_template(template: &str, context: &CommitContext) -> String {
    let replacements = [
        ("type", context.commit_type.clone()),
        ("scope", context.scope.clone().unwrap_or_default()),
        ("subject", context.subject.clone()),
        ("emoji", context.emoji.clone()),
        ("branch", context.branch.clone().unwrap_or_default()),
        ("files_changed", context.files_changed.to_string()),
        ("files_added", context.files_added.to_string()),
        ("files_modified", context.files_modified.to_string()),
        ("files_deleted", context.files_deleted.to_string()),
        ("body", context.body.join("\n")),
        ("scope_with_parens", context.scope_with_parens()),
    ];

    let mut rendered = template.to_string();
    for (key, value) in &replacements {
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }
    rendered.replace("\\n", "\n").replace("\\t", "\t")
}
