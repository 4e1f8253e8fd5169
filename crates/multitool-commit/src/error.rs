//! Error types for git plumbing

use std::path::PathBuf;

/// Result type alias for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Why git could not be used.
///
/// Each variant carries a shell-style marker code (see [`GitError::code`])
/// that shows up in logs and debug output.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The executable is not on `PATH`
    #[error("git executable '{executable}' not found; is Git installed and on PATH?")]
    NotFound { executable: String },

    /// The executable exists but may not be run
    #[error("permission denied running '{executable}'")]
    PermissionDenied { executable: String },

    /// No `.git` marker at or above the directory
    #[error("not a git repository (or any parent): {}", path.display())]
    NotARepository { path: PathBuf },

    /// The command did not finish in time and was killed
    #[error("`git {command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    /// `git --version` ran but reported failure
    #[error("`git --version` failed: {stderr}")]
    VersionFailed { stderr: String },

    /// Any other I/O failure while spawning or talking to the child
    #[error("I/O error running git: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Marker code: 127 not found, 126 permission denied, 128 not a
    /// repository, 124 timed out, 1 anything else.
    pub fn code(&self) -> i32 {
        match self {
            GitError::NotFound { .. } => 127,
            GitError::PermissionDenied { .. } => 126,
            GitError::NotARepository { .. } => 128,
            GitError::Timeout { .. } => 124,
            GitError::VersionFailed { .. } | GitError::Io(_) => 1,
        }
    }
}
