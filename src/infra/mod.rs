//! File I/O, filename derivation, git integration

mod fs;
mod git;
mod slug;

pub use fs::{FsError, read_note_file, remove_note_file, scan_notes_directory, write_note_file};
pub use git::{
    Committer, DEFAULT_GITIGNORE, GitCommitter, GitError, InitOutcome, NoCommit, init_repository,
    is_repository,
};
pub use slug::{NOTE_EXTENSION, note_filename, sanitize_title};
