//! Git repository fixtures at three realism levels.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.
//! Only the last level needs a `git` executable on `PATH`; guard those tests
//! with [`git_available`].

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Creates a minimal `.git` directory **without** initialising a repository.
///
/// Realism level: **FAKE** - directory structure only.
///
/// Use for: repository discovery tests that never run git.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Creates a `.git` **file** pointing elsewhere, the way linked worktrees and
/// submodules do.
///
/// Realism level: **FAKE** - marker file only.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn fake_git_file(path: &Path) {
    fs::write(path.join(".git"), "gitdir: ../.bare/worktrees/main\n")
        .unwrap_or_else(|e| panic!("fake_git_file: failed to write .git: {e}"));
}

/// Whether a usable `git` executable is on `PATH`.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Runs `git <args>` in `path` and returns its stdout.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Realism level: **REAL WITH HISTORY** - valid git state, `main` branch, one
/// commit in history.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Creates `README.md` and makes an initial commit
/// - Renames the default branch to `main`
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "."]);
    run_git(path, &["commit", "-m", "Initial commit"]);
    // Best-effort: older git versions may not support this flag
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Writes `contents` to `relative` inside `root`, creating parent directories.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let target = root.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: failed to create {}: {e}", parent.display()));
    }
    fs::write(&target, contents)
        .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", target.display()));
}

/// Writes and stages each `(path, contents)` pair.
///
/// # Panics
/// Panics if writing or `git add` fails.
pub fn stage_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        write_file(root, relative, contents);
        run_git(root, &["add", relative]);
    }
}

/// A scratch directory holding a committed repository on `main`.
///
/// # Panics
/// Panics if the directory or repository cannot be created.
pub fn scratch_repo() -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("scratch_repo: {e}"));
    real_git_repo_with_commit(dir.path());
    dir
}
