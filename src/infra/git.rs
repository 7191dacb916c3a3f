//! Version-control collaborator: commits note changes in a git working tree.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;
use tracing::debug;

/// Contents written to `.gitignore` by [`init_repository`].
pub const DEFAULT_GITIGNORE: &str = "# Ignore temporary files\n*.tmp\n*.temp\n.DS_Store\nThumbs.db\n";

/// Errors from running git.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git in {dir}: {source}")]
    Spawn {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`git {command}` failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Records a change to the storage directory.
///
/// Called by the file store after each save, rename and delete. Only
/// `files` go into the commit; anything else already staged stays staged.
/// Callers treat failures as non-fatal.
pub trait Committer {
    /// Stages `files` (names relative to `dir`, including removed ones) and
    /// commits them with `message`.
    fn commit(&self, dir: &Path, files: &[&str], message: &str) -> Result<(), GitError>;
}

/// Commits through the `git` executable.
///
/// Does nothing when `dir` is not the root of a git working tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommitter;

impl Committer for GitCommitter {
    fn commit(&self, dir: &Path, files: &[&str], message: &str) -> Result<(), GitError> {
        if !is_repository(dir) {
            debug!(dir = %dir.display(), "not a git repository, skipping commit");
            return Ok(());
        }

        let mut add = vec!["add", "-A", "--"];
        add.extend_from_slice(files);
        run_git(dir, &add)?;

        let mut commit = vec!["commit", "-q", "-m", message, "--"];
        commit.extend_from_slice(files);
        run_git(dir, &commit)?;

        debug!(dir = %dir.display(), commit_message = message, "committed");
        Ok(())
    }
}

/// Never commits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCommit;

impl Committer for NoCommit {
    fn commit(&self, _dir: &Path, _files: &[&str], _message: &str) -> Result<(), GitError> {
        Ok(())
    }
}

/// Returns true if `dir` contains a `.git` entry.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// What [`init_repository`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    /// A new repository was created (false if one already existed).
    pub created_repository: bool,
    /// A default `.gitignore` was written (false if one already existed).
    pub created_gitignore: bool,
}

/// Runs `git init` in `dir` unless it is already a repository, and writes a
/// default `.gitignore` if none exists.
///
/// # Errors
///
/// Returns `GitError::Spawn` if git cannot be run, `GitError::Failed` if
/// `git init` fails and `GitError::Io` if the `.gitignore` cannot be written.
pub fn init_repository(dir: &Path) -> Result<InitOutcome, GitError> {
    let created_repository = if is_repository(dir) {
        false
    } else {
        run_git(dir, &["init", "-q"])?;
        true
    };

    let gitignore = dir.join(".gitignore");
    let created_gitignore = if gitignore.exists() {
        false
    } else {
        std::fs::write(&gitignore, DEFAULT_GITIGNORE).map_err(|e| GitError::Io {
            path: gitignore.clone(),
            source: e,
        })?;
        true
    };

    Ok(InitOutcome {
        created_repository,
        created_gitignore,
    })
}

fn run_git(dir: &Path, args: &[&str]) -> Result<Output, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| GitError::Spawn {
            dir: dir.to_path_buf(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(GitError::Failed {
            command: args.join(" "),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
