//! Case-insensitive substring matching over note fields.

use std::fmt;

use crate::domain::Note;

/// A single field restriction for `field_search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Content,
    Title,
    Tag,
    /// Linked titles and URLs found in the content.
    Link,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Content,
        SearchField::Title,
        SearchField::Tag,
        SearchField::Link,
    ];
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Content => "content",
            SearchField::Title => "title",
            SearchField::Tag => "tag",
            SearchField::Link => "link",
        };
        write!(f, "{}", name)
    }
}

/// Criteria for `advanced_search`. A note matches when it satisfies every
/// criterion that is set; unset criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub content: Option<String>,
    pub title: Option<String>,
    pub tag: Option<String>,
    pub link: Option<String>,
}

impl SearchCriteria {
    /// Returns true if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.title.is_none() && self.tag.is_none() && self.link.is_none()
    }

    pub fn matches(&self, note: &Note) -> bool {
        [
            (SearchField::Content, &self.content),
            (SearchField::Title, &self.title),
            (SearchField::Tag, &self.tag),
            (SearchField::Link, &self.link),
        ]
        .into_iter()
        .all(|(field, query)| match query {
            Some(query) => matches_field(note, field, query),
            None => true,
        })
    }
}

/// A lowercased query.
struct Needle(String);

impl Needle {
    fn new(query: &str) -> Self {
        Needle(query.to_lowercase())
    }

    fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }

    fn found_in_any<'a>(&self, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
        haystacks.into_iter().any(|h| self.found_in(h))
    }
}

/// Universal search: title, content, tags, links, attached URLs, origin and
/// URLs found in the content.
pub fn matches_any(note: &Note, query: &str) -> bool {
    let needle = Needle::new(query);
    needle.found_in(note.title())
        || needle.found_in(note.content())
        || needle.found_in_any(note.tags().iter().map(String::as_str))
        || needle.found_in_any(note.links().iter().map(String::as_str))
        || needle.found_in_any(note.urls().iter().map(String::as_str))
        || note.origin().is_some_and(|origin| needle.found_in(origin))
        || needle.found_in_any(note.content_links())
}

/// Matches `query` against a single field.
pub fn matches_field(note: &Note, field: SearchField, query: &str) -> bool {
    let needle = Needle::new(query);
    match field {
        SearchField::Content => needle.found_in(note.content()),
        SearchField::Title => needle.found_in(note.title()),
        SearchField::Tag => needle.found_in_any(note.tags().iter().map(String::as_str)),
        SearchField::Link => {
            needle.found_in_any(note.links().iter().map(String::as_str))
                || needle.found_in_any(note.content_links())
        }
    }
}
