//! JSON-file-per-note store with commit-after-write.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::Note;
use crate::infra::{
    Committer, FsError, GitCommitter, note_filename, read_note_file, remove_note_file,
    scan_notes_directory, write_note_file,
};
use crate::store::{
    ChangeKind, LoadReport, LoadedNote, NoteStore, SkippedFile, StoreError, StoreResult,
};

/// Stores each note as `<sanitized title>.json` in a single directory.
///
/// Notes found by [`load_all`](NoteStore::load_all) under some other file
/// name keep being addressed through that file. Saving such a note moves it
/// to its derived name; deleting or renaming it removes the file it was
/// loaded from.
///
/// After every successful write or removal the configured [`Committer`] is
/// asked to record the change. Commit failures are logged and otherwise
/// ignored: the note is already on disk.
///
/// Overlapping processes working on the same directory are not coordinated;
/// the last writer wins.
pub struct FileStore<C: Committer = GitCommitter> {
    dir: PathBuf,
    committer: C,
    /// Title to file, as of the last load plus later writes.
    locations: RefCell<HashMap<String, PathBuf>>,
}

impl FileStore<GitCommitter> {
    /// Opens a store that commits to git when the directory is a repository.
    ///
    /// Creates the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::with_committer(dir, GitCommitter)
    }
}

impl<C: Committer> FileStore<C> {
    /// Opens a store with an explicit committer.
    ///
    /// Creates the directory if it does not exist.
    pub fn with_committer(dir: impl Into<PathBuf>, committer: C) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| FsError::from_io(&dir, e))?;
        Ok(Self {
            dir,
            committer,
            locations: RefCell::default(),
        })
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a note with `title` is written to.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(note_filename(title))
    }

    /// Returns the file currently holding `title`: the one it was loaded
    /// from, or its derived path.
    pub fn location(&self, title: &str) -> PathBuf {
        self.locations
            .borrow()
            .get(title)
            .cloned()
            .unwrap_or_else(|| self.path_for(title))
    }

    fn remember(&self, title: &str, path: PathBuf) {
        self.locations.borrow_mut().insert(title.to_string(), path);
    }

    fn forget(&self, title: &str) {
        self.locations.borrow_mut().remove(title);
    }

    /// Returns the title stored in the file at `path`, if the file exists.
    fn occupant(&self, path: &Path) -> StoreResult<Option<String>> {
        match read_note_file(path) {
            Ok(note) => Ok(Some(note.title().to_string())),
            Err(FsError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fails with `Collision` if `path` holds a title other than `title`.
    fn claim(&self, path: &Path, title: &str) -> StoreResult<()> {
        match self.occupant(path)? {
            Some(existing) if existing != title => Err(StoreError::Collision {
                title: title.to_string(),
                existing,
                path: path.to_path_buf(),
            }),
            _ => Ok(()),
        }
    }

    /// Fails with `NotFound` unless `path` holds exactly `title`.
    fn require(&self, path: &Path, title: &str) -> StoreResult<()> {
        match self.occupant(path)? {
            Some(existing) if existing == title => Ok(()),
            _ => Err(StoreError::NotFound {
                title: title.to_string(),
            }),
        }
    }

    /// Removes `path` if it still holds `title`. Returns whether it did.
    fn release(&self, path: &Path, title: &str) -> StoreResult<bool> {
        if self.occupant(path)?.as_deref() != Some(title) {
            return Ok(false);
        }
        remove_note_file(path)?;
        Ok(true)
    }

    fn record(&self, paths: &[&Path], message: String) {
        let names: Vec<String> = paths
            .iter()
            .map(|path| {
                path.strip_prefix(&self.dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        if let Err(e) = self.committer.commit(&self.dir, &names, &message) {
            warn!(error = %e, "note saved but not committed");
        }
    }
}

impl<C: Committer> NoteStore for FileStore<C> {
    fn load_all(&self) -> StoreResult<LoadReport> {
        let mut report = LoadReport::default();
        let mut locations = HashMap::new();

        for file in scan_notes_directory(&self.dir)? {
            let path = self.dir.join(&file);
            match read_note_file(&path) {
                Ok(note) => {
                    locations
                        .entry(note.title().to_string())
                        .or_insert_with(|| path.clone());
                    report.notes.push(LoadedNote { note, source: path });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable note file");
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        *self.locations.borrow_mut() = locations;
        debug!(
            dir = %self.dir.display(),
            loaded = report.notes.len(),
            skipped = report.skipped.len(),
            "loaded notes"
        );
        Ok(report)
    }

    fn save(&mut self, note: &Note, change: ChangeKind) -> StoreResult<()> {
        let title = note.title();
        let path = self.path_for(title);
        let previous = self.location(title);

        self.claim(&path, title)?;
        write_note_file(&path, note)?;
        debug!(path = %path.display(), %change, "wrote note");

        let message = format!("{} note: {}", change, title);
        if previous != path && self.release(&previous, title)? {
            debug!(from = %previous.display(), to = %path.display(), "moved note");
            self.remember(title, path.clone());
            self.record(&[&previous, &path], message);
        } else {
            self.remember(title, path.clone());
            self.record(&[&path], message);
        }
        Ok(())
    }

    fn delete(&mut self, title: &str) -> StoreResult<()> {
        let path = self.location(title);

        self.require(&path, title)?;
        remove_note_file(&path)?;
        self.forget(title);
        debug!(path = %path.display(), "removed note");

        self.record(&[&path], format!("{} note: {}", ChangeKind::Delete, title));
        Ok(())
    }

    fn rename(&mut self, old_title: &str, note: &Note) -> StoreResult<()> {
        let old_path = self.location(old_title);
        let new_path = self.path_for(note.title());

        self.require(&old_path, old_title)?;
        let message = format!(
            "{} note: {} -> {}",
            ChangeKind::Rename,
            old_title,
            note.title()
        );

        if old_path == new_path {
            write_note_file(&new_path, note)?;
            self.forget(old_title);
            self.remember(note.title(), new_path.clone());
            self.record(&[&new_path], message);
            return Ok(());
        }

        self.claim(&new_path, note.title())?;
        write_note_file(&new_path, note)?;
        remove_note_file(&old_path)?;
        self.forget(old_title);
        self.remember(note.title(), new_path.clone());
        debug!(from = %old_path.display(), to = %new_path.display(), "renamed note");

        self.record(&[&old_path, &new_path], message);
        Ok(())
    }
}
