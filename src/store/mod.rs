//! Note persistence behind a title-keyed store interface

mod file;
mod memory;
mod repository;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{
    ChangeKind, LoadReport, LoadedNote, NoteStore, SkippedFile, StoreError, StoreResult,
};
