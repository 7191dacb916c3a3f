//! Note struct representing a single JSON-persisted note.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::urls::extract_urls;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A titled note with tags, outgoing links and attached URLs.
///
/// The title is the note's identity: it is the storage key, the display name
/// and the value other notes store in their `links`.
///
/// # Required Fields
/// - `title`: Human-readable title (non-empty after trimming)
///
/// # Optional Fields
/// - `content`: Free-form body text
/// - `tags`: Labels, insertion-ordered and free of duplicates
/// - `origin`: Where the note came from ("Telegram", "Web", ...)
/// - `links`: Titles of referenced notes, in the order they were added
/// - `urls`: URLs explicitly attached to the note
///
/// # Examples
///
/// ```
/// use jotter::domain::Note;
///
/// let note = Note::builder("Trip")
///     .content("Pack the tent")
///     .tags(vec!["travel".to_string()])
///     .build()
///     .unwrap();
/// assert_eq!(note.title(), "Trip");
/// assert_eq!(note.tags(), ["travel"]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    content: String,
    tags: Vec<String>,
    origin: Option<String>,
    links: Vec<String>,
    urls: Vec<String>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Note {
    /// Creates a new note with only a title, timestamped now.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn new(title: impl Into<String>) -> Result<Self, ParseNoteError> {
        Self::builder(title).build()
    }

    /// Creates a builder for constructing a Note with optional fields.
    pub fn builder(title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns the titles this note references, in insertion order.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Returns the URLs explicitly attached to this note.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Returns URL-like substrings found in the content.
    ///
    /// These are derived on every call and never persisted as `urls`.
    pub fn content_links(&self) -> Vec<&str> {
        extract_urls(&self.content)
    }

    /// Returns true if this note links to `title`.
    pub fn links_to(&self, title: &str) -> bool {
        self.links.iter().any(|l| l == title)
    }

    // ===========================================
    // Mutators (used by the manager on a working copy)
    // ===========================================

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the new title is empty or whitespace-only.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ParseNoteError> {
        self.title = normalize_title(title.into())?;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Sets the origin. Empty or whitespace-only values clear it.
    pub fn set_origin(&mut self, origin: Option<impl Into<String>>) {
        self.origin = normalize_origin(origin.map(Into::into));
    }

    /// Adds a tag unless it is already present. Returns true if added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        push_unique(&mut self.tags, tag)
    }

    /// Removes a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        remove_value(&mut self.tags, tag)
    }

    /// Adds a link to another note's title. Returns true if added.
    pub fn add_link(&mut self, title: &str) -> bool {
        push_unique(&mut self.links, title)
    }

    /// Removes a link. Returns true if it was present.
    pub fn remove_link(&mut self, title: &str) -> bool {
        remove_value(&mut self.links, title)
    }

    /// Replaces every link to `from` with `to`, keeping positions.
    ///
    /// If `to` is already linked the stale entry is dropped instead, so links
    /// stay free of duplicates. Returns true if anything changed.
    pub fn replace_link(&mut self, from: &str, to: &str) -> bool {
        let Some(pos) = self.links.iter().position(|l| l == from) else {
            return false;
        };
        if self.links_to(to) {
            self.links.remove(pos);
        } else {
            self.links[pos] = to.to_string();
        }
        true
    }

    /// Adds an attached URL. Returns true if added.
    pub fn add_url(&mut self, url: &str) -> bool {
        push_unique(&mut self.urls, url)
    }

    /// Removes an attached URL. Returns true if it was present.
    pub fn remove_url(&mut self, url: &str) -> bool {
        remove_value(&mut self.urls, url)
    }

    /// Sets the updated timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = now;
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("tags", &self.tags)
            .field("origin", &self.origin)
            .field("links", &self.links)
            .field("urls", &self.urls)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .finish()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    title: String,
    content: String,
    tags: Vec<String>,
    origin: Option<String>,
    links: Vec<String>,
    urls: Vec<String>,
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
}

impl NoteBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            origin: None,
            links: Vec::new(),
            urls: Vec::new(),
            created: None,
            updated: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates and blank tags are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = deduplicate(tags);
        self
    }

    /// Sets the note's origin.
    ///
    /// Empty or whitespace-only strings are normalized to None.
    pub fn origin(mut self, origin: Option<impl Into<String>>) -> Self {
        self.origin = normalize_origin(origin.map(Into::into));
        self
    }

    pub fn links(mut self, links: Vec<String>) -> Self {
        self.links = deduplicate(links);
        self
    }

    pub fn urls(mut self, urls: Vec<String>) -> Self {
        self.urls = deduplicate(urls);
        self
    }

    /// Sets the creation timestamp (defaults to now).
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Sets the last-updated timestamp (defaults to the creation timestamp).
    pub fn updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    /// Builds the Note.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let title = normalize_title(self.title)?;
        let created = self.created.unwrap_or_else(Utc::now);

        Ok(Note {
            title,
            content: self.content,
            tags: self.tags,
            origin: self.origin,
            links: self.links,
            urls: self.urls,
            created,
            updated: self.updated.unwrap_or(created),
        })
    }
}

fn normalize_title(title: String) -> Result<String, ParseNoteError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ParseNoteError {
            kind: ParseNoteErrorKind::EmptyTitle,
        });
    }
    Ok(trimmed.to_string())
}

fn normalize_origin(origin: Option<String>) -> Option<String> {
    origin
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Removes duplicates and blank entries, keeping the first occurrence.
fn deduplicate(values: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if value.trim().is_empty() || result.contains(&value) {
            continue;
        }
        result.push(value);
    }
    result
}

fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    if value.trim().is_empty() || values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_string());
    true
}

fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value);
    values.len() != before
}

impl Serialize for Note {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("title", &self.title)?;

        if !self.content.is_empty() {
            map.serialize_entry("content", &self.content)?;
        }
        if !self.tags.is_empty() {
            map.serialize_entry("tags", &self.tags)?;
        }
        if let Some(ref origin) = self.origin {
            map.serialize_entry("origin", origin)?;
        }
        if !self.links.is_empty() {
            map.serialize_entry("links", &self.links)?;
        }
        if !self.urls.is_empty() {
            map.serialize_entry("urls", &self.urls)?;
        }

        map.serialize_entry("created", &self.created)?;
        map.serialize_entry("updated", &self.updated)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct NoteHelper {
            title: String,
            #[serde(default)]
            content: String,
            #[serde(default)]
            tags: Vec<String>,
            #[serde(default)]
            origin: Option<String>,
            #[serde(default, alias = "references")]
            links: Vec<String>,
            #[serde(default)]
            urls: Vec<String>,
            #[serde(default, alias = "created_at")]
            created: Option<DateTime<Utc>>,
            #[serde(default, alias = "updated_at")]
            updated: Option<DateTime<Utc>>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        let mut builder = Note::builder(helper.title)
            .content(helper.content)
            .tags(helper.tags)
            .origin(helper.origin)
            .links(helper.links)
            .urls(helper.urls);
        if let Some(created) = helper.created {
            builder = builder.created(created);
        }
        if let Some(updated) = helper.updated {
            builder = builder.updated(updated);
        }

        builder.build().map_err(serde::de::Error::custom)
    }
}
