//! Note set, numeric listings, references and search

mod listing;
mod notes;
mod search;

pub use listing::Listing;
pub use notes::{ManagerError, ManagerResult, NoteManager, NoteUpdate};
pub use search::{SearchCriteria, SearchField, matches_any, matches_field};
