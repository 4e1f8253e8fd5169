//! Commit message suggestions for multitool
//!
//! Turns the changes git reports into Conventional Commits candidates:
//!
//! - [`status`] - `--name-status` parsing into a [`DiffSummary`]
//! - [`infer`] - keyword-driven type and top-level-directory scope, plus
//!   branch-name overrides
//! - [`rules`] - caller rules (allowed types, scope enum, subject length)
//! - [`locale`] - Korean and English subjects, bodies and guidance
//! - [`message`] - built-in and template rendering
//! - [`git`] - the git subprocess runner and repository discovery
//! - [`suggest`] - the full flow, producing the final text

pub mod error;
pub mod git;
pub mod infer;
pub mod locale;
pub mod message;
pub mod rules;
pub mod status;
pub mod suggest;

pub use error::{GitError, Result};
pub use git::{DiffMode, GitCli, GitOutput, find_repository};
pub use infer::{Inference, infer};
pub use locale::Language;
pub use message::{
    CommitContext, emoji_for, format_subject, render_conventional, render_template,
    truncate_subject,
};
pub use rules::{CommitRules, DEFAULT_TYPES};
pub use status::{ChangeRecord, ChangeStatus, DiffStats, DiffSummary, summarize};
pub use suggest::{SuggestOptions, resolve_directory, suggest};
