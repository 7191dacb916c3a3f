//! NoteStore trait and result types.

use crate::domain::Note;
use crate::infra::FsError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored note has this title.
    #[error("note not found in storage: {title}")]
    NotFound { title: String },

    /// The title maps to a storage slot already holding a different title.
    #[error("cannot store '{title}': {path} already holds note '{existing}'")]
    Collision {
        title: String,
        existing: String,
        path: PathBuf,
    },

    /// A file system operation failed.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// The backing store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The kind of change being persisted, used to label commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Rename,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeKind::Create => "Create",
            ChangeKind::Update => "Update",
            ChangeKind::Rename => "Rename",
            ChangeKind::Delete => "Delete",
        };
        write!(f, "{}", label)
    }
}

/// A stored item that could not be read as a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A note together with the slot it was read from.
#[derive(Debug, Clone)]
pub struct LoadedNote {
    pub note: Note,
    /// The file for `FileStore`, the title key for `MemoryStore`.
    pub source: PathBuf,
}

/// Everything `load_all` found.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub notes: Vec<LoadedNote>,
    /// Items skipped because they were not valid note data.
    pub skipped: Vec<SkippedFile>,
}

/// Key-value persistence for notes, keyed by title.
///
/// Implementations decide how a title maps to a storage slot. A slot holds
/// exactly one title; writing a different title into an occupied slot is a
/// `StoreError::Collision`, never a silent overwrite.
pub trait NoteStore {
    /// Loads every stored note.
    ///
    /// Individual items that fail to parse are reported in
    /// `LoadReport::skipped` rather than failing the whole load. Later
    /// `save`, `delete` and `rename` calls address a loaded note through
    /// the slot it was loaded from, even when that is not the slot its
    /// title maps to.
    fn load_all(&self) -> StoreResult<LoadReport>;

    /// Persists a note, overwriting the stored note with the same title.
    fn save(&mut self, note: &Note, change: ChangeKind) -> StoreResult<()>;

    /// Removes the note with this title.
    ///
    /// Returns `StoreError::NotFound` if no such note is stored.
    fn delete(&mut self, title: &str) -> StoreResult<()>;

    /// Replaces the note stored as `old_title` with `note` (stored under its
    /// own title).
    fn rename(&mut self, old_title: &str, note: &Note) -> StoreResult<()> {
        self.save(note, ChangeKind::Rename)?;
        self.delete(old_title)
    }
}
