//! Commit type and scope inference
//!
//! The type comes from keyword patterns over the changed paths, tested in a
//! fixed priority order; the scope is the first top-level directory. A
//! conventional branch name (`feature/login`, `fix/crash`) overrides both.

use std::sync::LazyLock;

use regex::Regex;

use crate::status::ChangeRecord;

/// Type patterns in priority order; the first match wins.
static TYPE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("fix", r"(fix|bug|error|exception|hotfix)"),
        ("docs", r"(doc|readme|mkdocs|docs/|\.md$)"),
        ("test", r"(test|spec|pytest|jest|\.test\.|__tests__|\.spec\.)"),
        (
            "build",
            r"(build|dockerfile|docker-compose|\.lock$|package\.json|requirements\.txt)",
        ),
        ("refactor", r"(refactor|rename|cleanup|restructure)"),
        ("perf", r"(perf|benchmark|optimi[s|z]e)"),
    ]
    .into_iter()
    .map(|(commit_type, pattern)| (commit_type, Regex::new(pattern).unwrap()))
    .collect()
});

static BRANCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feature|fix|docs|refactor|test|chore|perf|build)(?:/([^/]+))?").unwrap()
});

/// Type used when no pattern matches.
pub const FALLBACK_TYPE: &str = "feat";

/// Type used when nothing changed.
pub const EMPTY_TYPE: &str = "chore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub commit_type: String,
    pub scope: Option<String>,
}

impl Inference {
    /// Let a conventional branch name override the inferred type and scope.
    ///
    /// The prefix only has to match at the start, so `fixture-data` counts as
    /// a `fix` branch. A scope segment (`feature/<scope>`) replaces the scope;
    /// without one the inferred scope is kept.
    pub fn with_branch(mut self, branch: &str) -> Self {
        if let Some(caps) = BRANCH_PATTERN.captures(branch) {
            self.commit_type = match &caps[1] {
                "feature" => "feat".to_string(),
                prefix => prefix.to_string(),
            };
            if let Some(scope) = caps.get(2) {
                self.scope = Some(scope.as_str().to_string());
            }
        }
        self
    }
}

/// Infer the commit type and scope from the changed paths.
pub fn infer(changes: &[ChangeRecord]) -> Inference {
    if changes.is_empty() {
        return Inference {
            commit_type: EMPTY_TYPE.to_string(),
            scope: None,
        };
    }

    // `$` anchors to the end of the whole blob, so `.md$` and `.lock$` only
    // ever see the last path.
    let blob = changes
        .iter()
        .map(|change| change.path.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let commit_type = TYPE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&blob))
        .map_or(FALLBACK_TYPE, |(commit_type, _)| *commit_type);

    let scope = changes.iter().find_map(|change| {
        let mut segments = change.path.split('/');
        let first = segments.next()?;
        segments.next()?;
        (first != "." && first != "..").then(|| first.to_string())
    });

    Inference {
        commit_type: commit_type.to_string(),
        scope,
    }
}
