//! Command handlers for the CLI.

mod completions;
mod notes;
mod refs;
mod search;
mod setup;
mod urls;

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::output::{NoteListing, Output, OutputFormat, format_listing_line};
use crate::manager::{Listing, NoteManager};
use crate::store::FileStore;

// Re-export public items
pub use completions::handle_completions;
pub use notes::{
    handle_create, handle_delete, handle_list, handle_read, handle_rename, handle_update,
};
pub use refs::{handle_add_ref, handle_remove_ref, handle_show_back_refs, handle_show_refs};
pub use search::{handle_advanced_search, handle_field_search, handle_search};
pub use setup::{handle_config, handle_init, handle_init_git};
pub use urls::{handle_add_url, handle_remove_url, handle_show_urls};

// ===========================================
// Shared Utilities
// ===========================================

pub(crate) type Manager = NoteManager<FileStore>;

/// Opens the notes directory and loads every note.
///
/// Files that cannot be parsed are skipped; each one is logged as a warning.
pub(crate) fn open_manager(notes_dir: &Path) -> Result<Manager> {
    let store = FileStore::open(notes_dir)
        .with_context(|| format!("failed to open notes directory: {}", notes_dir.display()))?;
    NoteManager::open(store)
        .with_context(|| format!("failed to load notes from {}", notes_dir.display()))
}

/// Builds listing rows for `titles`, numbered by their position in `full`.
pub(crate) fn rows_for<'a>(
    manager: &Manager,
    full: &Listing,
    titles: impl IntoIterator<Item = &'a str>,
) -> Vec<NoteListing> {
    titles
        .into_iter()
        .map(|title| NoteListing {
            position: full.position_of(title),
            title: title.to_string(),
            tags: manager
                .get(title)
                .map(|note| note.tags().to_vec())
                .unwrap_or_default(),
        })
        .collect()
}

/// Prints rows as numbered lines or as JSON.
pub(crate) fn print_rows(rows: Vec<NoteListing>, format: OutputFormat, empty: &str) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if rows.is_empty() {
                println!("{}", empty);
            }
            for row in &rows {
                println!(
                    "{}",
                    format_listing_line(row.position, &row.title, &row.tags)
                );
            }
            Ok(())
        }
        OutputFormat::Json => Output::new(rows).print(),
    }
}

/// Prints the notes of a search result, numbered by their position in the
/// full listing so the numbers stay valid for the next command.
pub(crate) fn print_hits(
    manager: &Manager,
    hits: &Listing,
    format: OutputFormat,
    empty: &str,
) -> Result<()> {
    let full = manager.list();
    let rows = rows_for(manager, &full, hits.iter().map(|(_, title)| title));
    print_rows(rows, format, empty)
}
