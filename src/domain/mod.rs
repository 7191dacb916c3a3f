//! Core types: Note, NoteRef, URL extraction

mod note;
mod note_ref;
mod urls;

pub use note::{Note, NoteBuilder, ParseNoteError};
pub use note_ref::NoteRef;
pub use urls::extract_urls;
