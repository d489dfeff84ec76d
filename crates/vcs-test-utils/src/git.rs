//! Git repository fixtures built with the `git` CLI.
//!
//! Every fixture panics on failure; they are meant for test setup only.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git <args>` in `path` and return its stdout.
///
/// # Panics
/// Panics if git cannot be spawned or exits unsuccessfully.
pub fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Configure a local identity and disable commit and tag signing, so commits
/// work regardless of the machine's global git config.
pub fn configure_identity(path: &Path) {
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    run_git(path, &["config", "tag.gpgsign", "false"]);
}

/// Initialises a repository at `path` with one commit on `main`.
///
/// - Runs `git init`
/// - Configures identity via [`configure_identity`]
/// - Creates `README.md` and makes an initial commit
/// - Renames the current branch to `main`
pub fn real_git_repo_with_commit(path: &Path) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to create dir: {e}"));
    run_git(path, &["init"]);
    configure_identity(path);

    fs::write(path.join("README.md"), "# Test")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    run_git(path, &["add", "README.md"]);
    run_git(path, &["commit", "-m", "Initial commit"]);
    run_git(path, &["branch", "-M", "main"]);
}

/// Initialises a bare repository at `path`, usable as a push target.
pub fn bare_git_repo(path: &Path) {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("bare_git_repo: failed to create dir: {e}"));
    run_git(path, &["init", "--bare"]);
}

/// Write `content` to `name` inside `repo`.
pub fn write_file(repo: &Path, name: &str, content: &str) {
    fs::write(repo.join(name), content)
        .unwrap_or_else(|e| panic!("write_file: failed to write {name}: {e}"));
}

/// Write an executable `/bin/sh` script named `name` into `dir`.
///
/// Useful as a stand-in for the git executable when a test needs exact
/// control over exit codes and output streams.
#[cfg(unix)]
pub fn fake_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .unwrap_or_else(|e| panic!("fake_executable: failed to write script: {e}"));
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("fake_executable: failed to chmod script: {e}"));
    path
}
