//! Reference handlers (add-ref, remove-ref, show-refs, show-back-refs).

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_manager, print_rows, rows_for};
use crate::cli::{NoteArgs, RefArgs};

pub fn handle_add_ref(args: &RefArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let from = manager.resolve(&listing, &args.note)?.title().to_string();

    let added = manager
        .add_reference(&listing, &args.note, &args.target)
        .with_context(|| format!("failed to add reference from '{}'", from))?;

    let to = manager.resolve(&listing, &args.target)?.title();
    if added {
        println!("Added reference: {} -> {}", from, to);
    } else {
        println!("{} already references {}", from, to);
    }
    Ok(())
}

pub fn handle_remove_ref(args: &RefArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let from = manager.resolve(&listing, &args.note)?.title().to_string();
    let to = manager
        .resolve(&listing, &args.target)
        .map(|note| note.title().to_string())
        .unwrap_or_else(|_| args.target.as_title());

    let removed = manager
        .remove_reference(&listing, &args.note, &args.target)
        .with_context(|| format!("failed to remove reference from '{}'", from))?;

    if removed {
        println!("Removed reference: {} -> {}", from, to);
    } else {
        println!("{} does not reference {}", from, to);
    }
    Ok(())
}

pub fn handle_show_refs(args: &NoteArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let references = manager.references(&listing, &args.note)?;

    let rows = rows_for(&manager, &listing, references.iter().map(String::as_str));
    print_rows(rows, args.format, "No references.")
}

pub fn handle_show_back_refs(args: &NoteArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let back_references = manager.back_references(&listing, &args.note)?;

    let rows = rows_for(
        &manager,
        &listing,
        back_references.iter().map(|note| note.title()),
    );
    print_rows(rows, args.format, "No back-references.")
}
