//! Git subprocess runner
//!
//! Git is run directly (never through a shell) with piped output and a hard
//! timeout. A child that outlives its timeout is killed and reaped before
//! [`GitError::Timeout`] is returned.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{GitError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Which changes to diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffMode {
    /// `git diff --staged`
    Staged,
    /// `git diff` against the working tree
    Working,
    /// `git diff <range>`
    Range(String),
}

impl DiffMode {
    pub fn name(&self) -> &'static str {
        match self {
            DiffMode::Staged => "staged",
            DiffMode::Working => "working",
            DiffMode::Range(_) => "range",
        }
    }

    fn args(&self) -> Vec<&str> {
        match self {
            DiffMode::Staged => vec!["diff", "--staged", "--name-status"],
            DiffMode::Working => vec!["diff", "--name-status"],
            DiffMode::Range(range) => vec!["diff", "--name-status", range.as_str()],
        }
    }
}

/// Captured result of a finished git command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code; -1 when the process was ended by a signal
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Handle on a git executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    executable: String,
    timeout: Duration,
    version_timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, timeout: Duration, version_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.version_timeout = version_timeout;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Check that git runs, returning its version line.
    pub async fn version(&self) -> Result<String> {
        let output = self
            .spawn_and_wait(None, &["--version"], self.version_timeout)
            .await?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            Err(GitError::VersionFailed {
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Run `git <args>` in `cwd`. A non-zero exit is reported in the output,
    /// not as an error.
    pub async fn run(&self, cwd: &Path, args: &[&str]) -> Result<GitOutput> {
        self.spawn_and_wait(Some(cwd), args, self.timeout).await
    }

    pub async fn diff_name_status(&self, cwd: &Path, mode: &DiffMode) -> Result<GitOutput> {
        self.run(cwd, &mode.args()).await
    }

    /// Name of the checked-out branch, or `None` when HEAD is detached or
    /// the lookup fails.
    pub async fn current_branch(&self, cwd: &Path) -> Option<String> {
        match self.run(cwd, &["rev-parse", "--abbrev-ref", "HEAD"]).await {
            Ok(output) if output.success() => {
                let branch = output.stdout.trim();
                (!branch.is_empty() && branch != "HEAD").then(|| branch.to_string())
            }
            Ok(output) => {
                warn!(code = output.code, stderr = %output.stderr.trim(), "Branch lookup failed");
                None
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Branch lookup failed");
                None
            }
        }
    }

    async fn spawn_and_wait(
        &self,
        cwd: Option<&Path>,
        args: &[&str],
        limit: Duration,
    ) -> Result<GitOutput> {
        let mut command = Command::new(&self.executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        debug!(executable = %self.executable, ?args, "Running git");
        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;
        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();

        let waited = tokio::time::timeout(limit, async {
            tokio::try_join!(
                read_pipe(stdout.as_mut()),
                read_pipe(stderr.as_mut()),
                child.wait()
            )
        })
        .await;

        match waited {
            Ok(Ok((out, err, status))) => Ok(GitOutput {
                code: status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&out).into_owned(),
                stderr: String::from_utf8_lossy(&err).into_owned(),
            }),
            Ok(Err(e)) => Err(GitError::Io(e)),
            Err(_) => {
                let _ = child.kill().await;
                Err(GitError::Timeout {
                    command: args.join(" "),
                    secs: limit.as_secs(),
                })
            }
        }
    }

    fn spawn_error(&self, error: std::io::Error) -> GitError {
        match error.kind() {
            std::io::ErrorKind::NotFound => GitError::NotFound {
                executable: self.executable.clone(),
            },
            std::io::ErrorKind::PermissionDenied => GitError::PermissionDenied {
                executable: self.executable.clone(),
            },
            _ => GitError::Io(error),
        }
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<&mut R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Walk from `start` upward looking for a `.git` directory or file.
///
/// Returns the directory that holds the marker.
pub fn find_repository(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
