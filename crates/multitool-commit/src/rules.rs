//! Commit rules supplied by the caller

use serde::Deserialize;

/// Types allowed when the caller does not restrict them.
pub const DEFAULT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "refactor", "test", "chore", "build", "perf", "ci",
];

pub const DEFAULT_SUBJECT_MAX: usize = 72;
pub const MIN_SUBJECT_MAX: usize = 10;
pub const MAX_SUBJECT_MAX: usize = 120;

/// Scope substituted when a scope is required but none was inferred.
pub const REQUIRED_SCOPE_FALLBACK: &str = "core";

/// Caller-supplied rules. Every field is optional; accessors apply defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitRules {
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub require_scope: Option<bool>,
    #[serde(default)]
    pub subject_max: Option<i64>,
    #[serde(default)]
    pub allow_emoji: Option<bool>,
    #[serde(default)]
    pub scope_enum: Option<Vec<String>>,
}

impl CommitRules {
    /// Allowed types; a missing or empty list means [`DEFAULT_TYPES`].
    pub fn allowed_types(&self) -> Vec<String> {
        match &self.types {
            Some(types) if !types.is_empty() => types.clone(),
            _ => DEFAULT_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn require_scope(&self) -> bool {
        self.require_scope.unwrap_or(false)
    }

    /// Subject length limit; missing or zero means the default, anything
    /// else is clamped to `[10, 120]`.
    pub fn subject_max(&self) -> usize {
        match self.subject_max {
            None | Some(0) => DEFAULT_SUBJECT_MAX,
            Some(n) => n.clamp(MIN_SUBJECT_MAX as i64, MAX_SUBJECT_MAX as i64) as usize,
        }
    }

    pub fn allow_emoji(&self) -> bool {
        self.allow_emoji.unwrap_or(false)
    }

    /// Bring an inferred type and scope in line with the rules.
    ///
    /// A scope outside a non-empty `scope_enum` is dropped; a required but
    /// missing scope becomes `core`; a disallowed type becomes `feat` when
    /// that is allowed, else the first allowed type.
    pub fn enforce(&self, commit_type: &str, scope: Option<String>) -> (String, Option<String>) {
        let mut scope = scope;
        let outside_enum = self.scope_enum.as_ref().is_some_and(|allowed| {
            !allowed.is_empty() && !scope.as_ref().is_some_and(|s| allowed.contains(s))
        });
        if outside_enum {
            scope = None;
        }
        if self.require_scope() && scope.is_none() {
            scope = Some(REQUIRED_SCOPE_FALLBACK.to_string());
        }

        let allowed = self.allowed_types();
        let commit_type = if allowed.iter().any(|t| t == commit_type) {
            commit_type.to_string()
        } else if allowed.iter().any(|t| t == "feat") {
            "feat".to_string()
        } else {
            allowed[0].clone()
        };

        (commit_type, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn types(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_defaults() {
        let rules = CommitRules::default();
        assert_eq!(rules.allowed_types().len(), 9);
        assert!(!rules.require_scope());
        assert_eq!(rules.subject_max(), 72);
        assert!(!rules.allow_emoji());
    }

    #[test]
    fn test_empty_types_mean_defaults() {
        let rules = CommitRules {
            types: types(&[]),
            ..Default::default()
        };
        assert_eq!(rules.allowed_types()[0], "feat");
    }

    #[rstest]
    #[case(None, 72)]
    #[case(Some(0), 72)]
    #[case(Some(5), 10)]
    #[case(Some(-3), 10)]
    #[case(Some(50), 50)]
    #[case(Some(500), 120)]
    fn test_subject_max_clamped(#[case] given: Option<i64>, #[case] expected: usize) {
        let rules = CommitRules {
            subject_max: given,
            ..Default::default()
        };
        assert_eq!(rules.subject_max(), expected);
    }

    #[test]
    fn test_disallowed_type_falls_back_to_first_allowed() {
        let rules = CommitRules {
            types: types(&["chore", "docs"]),
            ..Default::default()
        };
        assert_eq!(rules.enforce("fix", None).0, "chore");
        assert_eq!(rules.enforce("docs", None).0, "docs");
    }

    #[test]
    fn test_disallowed_type_prefers_feat() {
        let rules = CommitRules {
            types: types(&["chore", "feat"]),
            ..Default::default()
        };
        assert_eq!(rules.enforce("perf", None).0, "feat");
    }

    #[test]
    fn test_scope_enum_gates_scope() {
        let rules = CommitRules {
            scope_enum: types(&["api", "ui"]),
            ..Default::default()
        };
        assert_eq!(rules.enforce("feat", Some("src".into())).1, None);
        assert_eq!(rules.enforce("feat", Some("ui".into())).1.as_deref(), Some("ui"));
    }

    #[test]
    fn test_empty_scope_enum_does_not_gate() {
        let rules = CommitRules {
            scope_enum: types(&[]),
            ..Default::default()
        };
        assert_eq!(rules.enforce("feat", Some("src".into())).1.as_deref(), Some("src"));
    }

    #[test]
    fn test_required_scope_defaults_to_core() {
        let rules = CommitRules {
            require_scope: Some(true),
            scope_enum: types(&["api"]),
            ..Default::default()
        };
        assert_eq!(rules.enforce("feat", Some("src".into())).1.as_deref(), Some("core"));
        assert_eq!(rules.enforce("feat", None).1.as_deref(), Some("core"));
    }

    #[test]
    fn test_unknown_rule_field_is_rejected() {
        let err = serde_json::from_value::<CommitRules>(serde_json::json!({"max_len": 3}));
        assert!(err.is_err());
    }

    #[test]
    fn test_rules_deserialize() {
        let rules: CommitRules = serde_json::from_value(serde_json::json!({
            "types": ["fix"],
            "require_scope": true,
            "subject_max": 40,
            "allow_emoji": true,
            "scope_enum": ["core"]
        }))
        .unwrap();
        assert_eq!(rules.allowed_types(), vec!["fix".to_string()]);
        assert!(rules.require_scope());
        assert_eq!(rules.subject_max(), 40);
        assert!(rules.allow_emoji());
    }
}
