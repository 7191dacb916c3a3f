//! Note identifiers as typed on the command line: a title or a list position.

use std::fmt;
use std::str::FromStr;

/// A reference to a note, either by literal title or by 1-based position in
/// the most recent listing.
///
/// Parsing is done once, at the CLI boundary. Only canonical positive
/// integers become `Index`: `"3"` is a position, while `"03"`, `"0"` and
/// `"-1"` are titles.
///
/// # Examples
///
/// ```
/// use jotter::domain::NoteRef;
///
/// assert_eq!("2".parse::<NoteRef>().unwrap(), NoteRef::Index(2));
/// assert_eq!(
///     "Groceries".parse::<NoteRef>().unwrap(),
///     NoteRef::Title("Groceries".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NoteRef {
    Title(String),
    Index(usize),
}

impl NoteRef {
    /// Returns the text a title lookup should use for this reference.
    ///
    /// For `Index` this is the number itself, so that a note literally titled
    /// `"7"` stays reachable when position 7 does not exist.
    pub fn as_title(&self) -> String {
        match self {
            NoteRef::Title(title) => title.clone(),
            NoteRef::Index(position) => position.to_string(),
        }
    }
}

impl fmt::Display for NoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteRef::Title(title) => write!(f, "{}", title),
            NoteRef::Index(position) => write!(f, "{}", position),
        }
    }
}

impl FromStr for NoteRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(position) = trimmed.parse::<usize>()
            && position > 0
            && position.to_string() == trimmed
        {
            return Ok(NoteRef::Index(position));
        }
        Ok(NoteRef::Title(trimmed.to_string()))
    }
}

impl From<&str> for NoteRef {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(note_ref) => note_ref,
            Err(never) => match never {},
        }
    }
}

impl From<usize> for NoteRef {
    fn from(position: usize) -> Self {
        NoteRef::Index(position)
    }
}
