//! The in-memory note set and every operation on it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use super::listing::Listing;
use super::search::{SearchCriteria, SearchField, matches_any, matches_field};
use crate::domain::{Note, NoteRef, ParseNoteError};
use crate::store::{ChangeKind, NoteStore, SkippedFile, StoreError};

/// Errors from note operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The identifier matched neither a listing position nor a title.
    #[error("note not found: {identifier}")]
    NotFound { identifier: String },

    #[error("a note titled '{title}' already exists")]
    Duplicate { title: String },

    #[error("note '{title}' cannot reference itself")]
    SelfReference { title: String },

    #[error(transparent)]
    InvalidNote(#[from] ParseNoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for note operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// A partial update. Fields left as `None` or empty are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub content: Option<String>,
    /// `Some("")` clears the origin.
    pub origin: Option<String>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.origin.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
    }
}

/// Owns the loaded notes and keeps them in step with a [`NoteStore`].
///
/// Every mutation is applied to a copy, persisted, and only then written
/// back to the in-memory map, so a failed save leaves the map unchanged.
///
/// Operations that take a [`NoteRef`] resolve it against the [`Listing`]
/// supplied by the caller: positions are looked up first, then the literal
/// text is tried as a title.
pub struct NoteManager<S: NoteStore> {
    store: S,
    notes: BTreeMap<String, Note>,
    skipped: Vec<SkippedFile>,
}

impl<S: NoteStore> NoteManager<S> {
    /// Loads every note from `store`.
    ///
    /// Unreadable items are recorded in [`skipped`](Self::skipped). When two
    /// items carry the same title the first one loaded wins.
    pub fn open(store: S) -> ManagerResult<Self> {
        let report = store.load_all()?;
        let mut notes = BTreeMap::new();
        let mut skipped = report.skipped;

        for loaded in report.notes {
            match notes.entry(loaded.note.title().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(loaded.note);
                }
                Entry::Occupied(slot) => {
                    warn!(
                        title = %slot.key(),
                        path = %loaded.source.display(),
                        "duplicate note title, keeping first"
                    );
                    skipped.push(SkippedFile {
                        path: loaded.source,
                        reason: format!("duplicate title '{}'", slot.key()),
                    });
                }
            }
        }

        debug!(notes = notes.len(), skipped = skipped.len(), "opened notes");
        Ok(Self {
            store,
            notes,
            skipped,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Items that could not be loaded.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Looks up a note by exact title.
    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.get(title)
    }

    // ===========================================
    // Resolution
    // ===========================================

    /// Resolves a reference to a loaded note.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::NotFound` if neither the position nor the
    /// literal title matches.
    pub fn resolve(&self, listing: &Listing, note_ref: &NoteRef) -> ManagerResult<&Note> {
        let title = self.resolve_title(listing, note_ref)?;
        self.loaded(&title)
    }

    fn resolve_title(&self, listing: &Listing, note_ref: &NoteRef) -> ManagerResult<String> {
        if let NoteRef::Index(position) = note_ref
            && let Some(title) = listing.get(*position)
            && self.notes.contains_key(title)
        {
            return Ok(title.to_string());
        }

        let title = note_ref.as_title();
        if self.notes.contains_key(&title) {
            Ok(title)
        } else {
            Err(ManagerError::NotFound {
                identifier: note_ref.to_string(),
            })
        }
    }

    fn loaded(&self, title: &str) -> ManagerResult<&Note> {
        self.notes.get(title).ok_or_else(|| ManagerError::NotFound {
            identifier: title.to_string(),
        })
    }

    /// Writes a persisted note back into the map and returns it.
    fn remember(&mut self, note: Note) -> &Note {
        match self.notes.entry(note.title().to_string()) {
            Entry::Occupied(mut slot) => {
                slot.insert(note);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(note),
        }
    }

    /// Persists an edited copy and writes it back into the map.
    fn save_edit(&mut self, mut note: Note) -> ManagerResult<&Note> {
        note.touch(Utc::now());
        self.store.save(&note, ChangeKind::Update)?;
        debug!(title = %note.title(), "updated note");
        Ok(self.remember(note))
    }

    // ===========================================
    // CRUD
    // ===========================================

    /// Creates and persists a new note.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::InvalidNote` for an empty title and
    /// `ManagerError::Duplicate` if the title is taken.
    pub fn create(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<String>,
        origin: Option<String>,
    ) -> ManagerResult<&Note> {
        let note = Note::builder(title)
            .content(content)
            .tags(tags)
            .origin(origin)
            .build()?;

        if self.notes.contains_key(note.title()) {
            return Err(ManagerError::Duplicate {
                title: note.title().to_string(),
            });
        }

        self.store.save(&note, ChangeKind::Create)?;
        debug!(title = %note.title(), "created note");
        Ok(self.remember(note))
    }

    pub fn read(&self, listing: &Listing, note_ref: &NoteRef) -> ManagerResult<&Note> {
        self.resolve(listing, note_ref)
    }

    /// Applies a partial update. Nothing is persisted if the update changes
    /// nothing.
    pub fn update(
        &mut self,
        listing: &Listing,
        note_ref: &NoteRef,
        update: NoteUpdate,
    ) -> ManagerResult<&Note> {
        let title = self.resolve_title(listing, note_ref)?;
        let current = self.loaded(&title)?;
        let mut note = current.clone();

        if let Some(content) = update.content {
            note.set_content(content);
        }
        if let Some(origin) = update.origin {
            note.set_origin(Some(origin));
        }
        for tag in &update.remove_tags {
            note.remove_tag(tag);
        }
        for tag in &update.add_tags {
            note.add_tag(tag);
        }

        if &note == current {
            debug!(title = %title, "update changed nothing");
            return self.loaded(&title);
        }
        self.save_edit(note)
    }

    /// Gives a note a new title and rewrites every link pointing at it.
    ///
    /// The listing slot of the note keeps its position under the new title.
    pub fn rename(
        &mut self,
        listing: &mut Listing,
        note_ref: &NoteRef,
        new_title: &str,
    ) -> ManagerResult<&Note> {
        let old_title = self.resolve_title(listing, note_ref)?;
        let mut note = self.loaded(&old_title)?.clone();
        note.set_title(new_title)?;
        let new_title = note.title().to_string();

        if new_title == old_title {
            return self.loaded(&old_title);
        }
        if self.notes.contains_key(&new_title) {
            return Err(ManagerError::Duplicate { title: new_title });
        }

        note.touch(Utc::now());
        self.store.rename(&old_title, &note)?;
        self.notes.remove(&old_title);
        self.remember(note);
        listing.rename(&old_title, &new_title);
        debug!(from = %old_title, to = %new_title, "renamed note");

        for referrer in self.referrers(&old_title) {
            let mut edited = self.loaded(&referrer)?.clone();
            edited.replace_link(&old_title, &new_title);
            self.save_edit(edited)?;
        }

        self.loaded(&new_title)
    }

    /// Deletes a note and removes it from every other note's links.
    ///
    /// The deleted note's listing slot is invalidated.
    pub fn delete(&mut self, listing: &mut Listing, note_ref: &NoteRef) -> ManagerResult<Note> {
        let title = self.resolve_title(listing, note_ref)?;

        self.store.delete(&title)?;
        let removed = self
            .notes
            .remove(&title)
            .ok_or_else(|| ManagerError::NotFound {
                identifier: title.clone(),
            })?;
        listing.invalidate(&title);
        debug!(title = %title, "deleted note");

        for referrer in self.referrers(&title) {
            let mut edited = self.loaded(&referrer)?.clone();
            edited.remove_link(&title);
            self.save_edit(edited)?;
        }

        Ok(removed)
    }

    /// Returns every note in display order: case-insensitive by title,
    /// ties broken by exact title.
    pub fn list(&self) -> Listing {
        Listing::new(self.ordered().map(|note| note.title().to_string()))
    }

    fn ordered(&self) -> impl Iterator<Item = &Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by_cached_key(|note| (note.title().to_lowercase(), note.title().to_string()));
        notes.into_iter()
    }

    // ===========================================
    // References
    // ===========================================

    /// Titles of notes linking to `title`, in map order.
    fn referrers(&self, title: &str) -> Vec<String> {
        self.notes
            .values()
            .filter(|note| note.links_to(title))
            .map(|note| note.title().to_string())
            .collect()
    }

    /// Adds a link from `from` to `to`. Returns false if it already existed.
    ///
    /// # Errors
    ///
    /// Returns `ManagerError::NotFound` if either side does not resolve and
    /// `ManagerError::SelfReference` if both resolve to the same note.
    pub fn add_reference(
        &mut self,
        listing: &Listing,
        from: &NoteRef,
        to: &NoteRef,
    ) -> ManagerResult<bool> {
        let from = self.resolve_title(listing, from)?;
        let to = self.resolve_title(listing, to)?;
        if from == to {
            return Err(ManagerError::SelfReference { title: from });
        }

        let mut note = self.loaded(&from)?.clone();
        if !note.add_link(&to) {
            return Ok(false);
        }
        self.save_edit(note)?;
        Ok(true)
    }

    /// Removes a link from `from` to `to`. Returns false if there was none.
    ///
    /// A link whose target no longer exists can still be removed by title.
    pub fn remove_reference(
        &mut self,
        listing: &Listing,
        from: &NoteRef,
        to: &NoteRef,
    ) -> ManagerResult<bool> {
        let from = self.resolve_title(listing, from)?;
        let to = match self.resolve_title(listing, to) {
            Ok(title) => title,
            Err(e @ ManagerError::NotFound { .. }) => {
                let literal = to.as_title();
                if !self.loaded(&from)?.links_to(&literal) {
                    return Err(e);
                }
                literal
            }
            Err(e) => return Err(e),
        };
        if from == to {
            return Err(ManagerError::SelfReference { title: from });
        }

        let mut note = self.loaded(&from)?.clone();
        if !note.remove_link(&to) {
            return Ok(false);
        }
        self.save_edit(note)?;
        Ok(true)
    }

    /// Titles the note links to, in the order they were added.
    pub fn references(&self, listing: &Listing, note_ref: &NoteRef) -> ManagerResult<&[String]> {
        Ok(self.resolve(listing, note_ref)?.links())
    }

    /// Notes that link to the referenced note, in display order.
    ///
    /// Computed by scanning every loaded note.
    pub fn back_references(
        &self,
        listing: &Listing,
        note_ref: &NoteRef,
    ) -> ManagerResult<Vec<&Note>> {
        let title = self.resolve(listing, note_ref)?.title();
        Ok(self.ordered().filter(|note| note.links_to(title)).collect())
    }

    // ===========================================
    // URLs
    // ===========================================

    /// Attaches a URL. Returns false if it was already attached or blank.
    pub fn add_url(
        &mut self,
        listing: &Listing,
        note_ref: &NoteRef,
        url: &str,
    ) -> ManagerResult<bool> {
        let url = url.trim();
        let title = self.resolve_title(listing, note_ref)?;
        let mut note = self.loaded(&title)?.clone();
        if url.is_empty() || !note.add_url(url) {
            return Ok(false);
        }
        self.save_edit(note)?;
        Ok(true)
    }

    /// Detaches a URL. Returns false if it was not attached.
    pub fn remove_url(
        &mut self,
        listing: &Listing,
        note_ref: &NoteRef,
        url: &str,
    ) -> ManagerResult<bool> {
        let title = self.resolve_title(listing, note_ref)?;
        let mut note = self.loaded(&title)?.clone();
        if !note.remove_url(url.trim()) {
            return Ok(false);
        }
        self.save_edit(note)?;
        Ok(true)
    }

    pub fn urls(&self, listing: &Listing, note_ref: &NoteRef) -> ManagerResult<&[String]> {
        Ok(self.resolve(listing, note_ref)?.urls())
    }

    // ===========================================
    // Search
    // ===========================================

    fn select(&self, predicate: impl Fn(&Note) -> bool) -> Listing {
        Listing::new(
            self.ordered()
                .filter(|note| predicate(note))
                .map(|note| note.title().to_string()),
        )
    }

    /// Notes where `query` appears in any searchable field.
    pub fn search(&self, query: &str) -> Listing {
        self.select(|note| matches_any(note, query))
    }

    /// Notes where `query` appears in `field`.
    pub fn field_search(&self, field: SearchField, query: &str) -> Listing {
        self.select(|note| matches_field(note, field, query))
    }

    /// Notes matching every criterion that is set.
    pub fn advanced_search(&self, criteria: &SearchCriteria) -> Listing {
        self.select(|note| criteria.matches(note))
    }
}
