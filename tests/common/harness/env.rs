//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::{JotCommand, TestNote};
use jotter::domain::Note;
use jotter::infra::{note_filename, read_note_file, write_note_file};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Isolated test environment with a temporary notes directory and config
/// file.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands built with [`TestEnv::cmd`] never touch the user's config.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the notes directory
    notes_dir: PathBuf,
    /// Path to the (possibly absent) config file
    config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("notes");
        std::fs::create_dir(&notes_dir).expect("Failed to create notes directory");
        let config_path = temp_dir.path().join("config").join("config.toml");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_path,
        }
    }

    /// Returns the path to the notes directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the path to the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the root of the temp directory.
    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Returns the file a note with this title is stored in.
    pub fn note_path(&self, title: &str) -> PathBuf {
        self.notes_dir.join(note_filename(title))
    }

    /// Writes a test note directly to the notes directory.
    pub fn add_note(&self, test_note: &TestNote) -> PathBuf {
        let note = test_note.to_note();
        let path = self.note_path(note.title());
        write_note_file(&path, &note).expect("Failed to write test note");
        path
    }

    /// Reads the stored note with this title.
    pub fn read_note(&self, title: &str) -> Note {
        read_note_file(&self.note_path(title)).expect("Failed to read note")
    }

    /// Writes a file to the notes directory and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a JotCommand configured for this test environment.
    pub fn cmd(&self) -> JotCommand {
        JotCommand::new()
            .dir(&self.notes_dir)
            .config_file(&self.config_path)
    }

    /// Creates a JotCommand that only sets the config file.
    pub fn cmd_without_dir(&self) -> JotCommand {
        JotCommand::new().config_file(&self.config_path)
    }

    /// Turns the notes directory into a git repository with a local identity.
    pub fn init_git(&self) {
        self.git(&["init", "-q"]);
        self.git(&["config", "user.name", "Test"]);
        self.git(&["config", "user.email", "test@example.com"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    /// Returns commit subjects, newest first.
    pub fn git_log(&self) -> Vec<String> {
        let output = Command::new("git")
            .args(["log", "--format=%s"])
            .current_dir(&self.notes_dir)
            .output()
            .expect("Failed to run git log");
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.notes_dir)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if a `git` executable is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir());
        assert!(!env.config_path().exists());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_and_read_note() {
        let env = TestEnv::new();
        let path = env.add_note(&TestNote::new("Round Trip").tag("t"));

        assert!(path.ends_with("Round_Trip.json"));
        assert_eq!(env.read_note("Round Trip").tags(), ["t"]);
    }

    #[test]
    fn test_env_provides_isolated_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[2], "--config-file");
    }
}
