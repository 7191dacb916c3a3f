//! Note lifecycle handlers (create, read, update, rename, delete, list).

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::{Manager, open_manager, print_rows, rows_for};
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::cli::{CreateArgs, DeleteArgs, ListArgs, ReadArgs, RenameArgs, UpdateArgs};
use crate::domain::Note;
use crate::manager::{Listing, NoteUpdate};

pub fn handle_create(args: &CreateArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;

    let note = manager
        .create(
            &args.title,
            &args.content,
            args.tags.clone(),
            args.origin.clone(),
        )
        .with_context(|| format!("failed to create note '{}'", args.title))?;

    println!("Created note: {}", note.title());
    Ok(())
}

pub fn handle_read(args: &ReadArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let note = manager.read(&listing, &args.note)?;

    let back_references: Vec<&str> = manager
        .back_references(&listing, &args.note)?
        .into_iter()
        .map(Note::title)
        .collect();
    let detail = NoteDetail {
        position: listing.position_of(note.title()),
        note,
        back_references,
        content_links: note.content_links(),
    };

    match args.format {
        OutputFormat::Human => {
            print_note(&detail);
            Ok(())
        }
        OutputFormat::Json => Output::new(detail).print(),
    }
}

fn print_note(detail: &NoteDetail<'_>) {
    let note = detail.note;
    match detail.position {
        Some(position) => println!("[{}] {}", position, note.title()),
        None => println!("{}", note.title()),
    }
    if !note.tags().is_empty() {
        println!("Tags: {}", note.tags().join(", "));
    }
    if let Some(origin) = note.origin() {
        println!("Origin: {}", origin);
    }
    println!(
        "Created: {}  Updated: {}",
        note.created().format("%Y-%m-%d %H:%M"),
        note.updated().format("%Y-%m-%d %H:%M")
    );
    if !note.links().is_empty() {
        println!("References: {}", note.links().join(", "));
    }
    if !detail.back_references.is_empty() {
        println!("Back-references: {}", detail.back_references.join(", "));
    }
    print_url_block("URLs", note.urls().iter().map(String::as_str));
    print_url_block("Links in content", detail.content_links.iter().copied());
    if !note.content().is_empty() {
        println!();
        println!("{}", note.content());
    }
}

fn print_url_block<'a>(heading: &str, urls: impl Iterator<Item = &'a str>) {
    let mut urls = urls.peekable();
    if urls.peek().is_none() {
        return;
    }
    println!("{}:", heading);
    for url in urls {
        println!("  {}", url);
    }
}

pub fn handle_update(args: &UpdateArgs, notes_dir: &Path) -> Result<()> {
    let update = NoteUpdate {
        content: args.content.clone(),
        origin: args.origin.clone(),
        add_tags: args.add_tags.clone(),
        remove_tags: args.remove_tags.clone(),
    };
    if update.is_empty() {
        bail!("nothing to update: pass --content, --origin, --add-tag or --remove-tag");
    }

    let mut manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let note = manager
        .update(&listing, &args.note, update)
        .with_context(|| format!("failed to update note '{}'", args.note))?;

    println!("Updated note: {}", note.title());
    Ok(())
}

pub fn handle_rename(args: &RenameArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let mut listing = manager.list();
    let old_title = manager.resolve(&listing, &args.note)?.title().to_string();

    let note = manager
        .rename(&mut listing, &args.note, &args.new_title)
        .with_context(|| format!("failed to rename note '{}'", old_title))?;

    println!("Renamed note: {} -> {}", old_title, note.title());
    Ok(())
}

pub fn handle_delete(args: &DeleteArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let mut listing = manager.list();
    let referrers = manager.back_references(&listing, &args.note)?.len();

    let note = manager
        .delete(&mut listing, &args.note)
        .with_context(|| format!("failed to delete note '{}'", args.note))?;

    println!("Deleted note: {}", note.title());
    if referrers > 0 {
        println!("Removed references from {} note(s)", referrers);
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let listing = manager.list();
    print_listing(&manager, &listing, args.format)
}

fn print_listing(manager: &Manager, listing: &Listing, format: OutputFormat) -> Result<()> {
    let rows = rows_for(manager, listing, listing.iter().map(|(_, title)| title));
    print_rows(rows, format, "No notes found.")
}
