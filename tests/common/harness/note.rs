//! Builder for test notes with sensible defaults.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use jotter::domain::Note;

/// Builder for creating test notes with sensible defaults.
#[derive(Debug)]
pub struct TestNote {
    title: String,
    content: String,
    tags: Vec<String>,
    origin: Option<String>,
    links: Vec<String>,
    urls: Vec<String>,
    created: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given title, timestamped now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            origin: None,
            links: Vec::new(),
            urls: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Sets the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the origin.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Adds a link to another note's title.
    pub fn link(mut self, title: impl Into<String>) -> Self {
        self.links.push(title.into());
        self
    }

    /// Attaches a URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// Converts to a domain note.
    pub fn to_note(&self) -> Note {
        Note::builder(&self.title)
            .content(&self.content)
            .tags(self.tags.clone())
            .origin(self.origin.clone())
            .links(self.links.clone())
            .urls(self.urls.clone())
            .created(self.created)
            .build()
            .expect("Invalid test note")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_domain() {
        let note = TestNote::new("Trip")
            .content("body")
            .tag("travel")
            .origin("Web")
            .link("Packing")
            .url("https://a.example")
            .to_note();

        assert_eq!(note.title(), "Trip");
        assert_eq!(note.content(), "body");
        assert_eq!(note.tags(), ["travel"]);
        assert_eq!(note.origin(), Some("Web"));
        assert_eq!(note.links(), ["Packing"]);
        assert_eq!(note.urls(), ["https://a.example"]);
    }
}
