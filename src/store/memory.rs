//! In-memory store for tests and benchmarks.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::Note;
use crate::store::{ChangeKind, LoadReport, LoadedNote, NoteStore, StoreError, StoreResult};

/// Keeps notes in a map keyed by exact title.
///
/// Every successful mutation is appended to a change log (formatted like
/// commit messages) so tests can assert what was persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: BTreeMap<String, Note>,
    changes: Vec<String>,
    fail_next_write: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `notes`, without logging changes.
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        Self {
            notes: notes
                .into_iter()
                .map(|n| (n.title().to_string(), n))
                .collect(),
            ..Self::default()
        }
    }

    /// Makes the next save, rename or delete fail with `StoreError::Unavailable`.
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// Returns the stored note with this title.
    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.get(title)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the log of persisted changes, oldest first.
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    fn check_writable(&mut self) -> StoreResult<()> {
        if std::mem::take(&mut self.fail_next_write) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        Ok(())
    }
}

impl NoteStore for MemoryStore {
    fn load_all(&self) -> StoreResult<LoadReport> {
        Ok(LoadReport {
            notes: self
                .notes
                .iter()
                .map(|(title, note)| LoadedNote {
                    note: note.clone(),
                    source: PathBuf::from(title),
                })
                .collect(),
            skipped: Vec::new(),
        })
    }

    fn save(&mut self, note: &Note, change: ChangeKind) -> StoreResult<()> {
        self.check_writable()?;
        self.notes.insert(note.title().to_string(), note.clone());
        self.changes.push(format!("{} note: {}", change, note.title()));
        Ok(())
    }

    fn delete(&mut self, title: &str) -> StoreResult<()> {
        self.check_writable()?;
        if self.notes.remove(title).is_none() {
            return Err(StoreError::NotFound {
                title: title.to_string(),
            });
        }
        self.changes
            .push(format!("{} note: {}", ChangeKind::Delete, title));
        Ok(())
    }

    fn rename(&mut self, old_title: &str, note: &Note) -> StoreResult<()> {
        self.check_writable()?;
        if self.notes.remove(old_title).is_none() {
            return Err(StoreError::NotFound {
                title: old_title.to_string(),
            });
        }
        self.notes.insert(note.title().to_string(), note.clone());
        self.changes.push(format!(
            "{} note: {} -> {}",
            ChangeKind::Rename,
            old_title,
            note.title()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str) -> Note {
        Note::new(title).unwrap()
    }

    #[test]
    fn save_load_delete() {
        let mut store = MemoryStore::new();
        store.save(&note("A"), ChangeKind::Create).unwrap();

        assert_eq!(store.load_all().unwrap().notes.len(), 1);
        store.delete("A").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.changes(), ["Create note: A", "Delete note: A"]);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.delete("A"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn injected_failure_applies_once() {
        let mut store = MemoryStore::new();
        store.fail_next_write();

        assert!(store.save(&note("A"), ChangeKind::Create).is_err());
        assert!(store.get("A").is_none());
        assert!(store.save(&note("A"), ChangeKind::Create).is_ok());
    }

    #[test]
    fn with_notes_does_not_log() {
        let store = MemoryStore::with_notes([note("A"), note("B")]);
        assert_eq!(store.len(), 2);
        assert!(store.changes().is_empty());
    }
}
