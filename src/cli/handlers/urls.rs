//! URL handlers (add-url, remove-url, show-urls).

use anyhow::{Context, Result};
use std::path::Path;

use super::open_manager;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{NoteArgs, UrlArgs};

pub fn handle_add_url(args: &UrlArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let title = manager.resolve(&listing, &args.note)?.title().to_string();

    let added = manager
        .add_url(&listing, &args.note, &args.url)
        .with_context(|| format!("failed to add URL to '{}'", title))?;

    if added {
        println!("Added URL to {}: {}", title, args.url.trim());
    } else {
        println!("{} already has URL {}", title, args.url.trim());
    }
    Ok(())
}

pub fn handle_remove_url(args: &UrlArgs, notes_dir: &Path) -> Result<()> {
    let mut manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let title = manager.resolve(&listing, &args.note)?.title().to_string();

    let removed = manager
        .remove_url(&listing, &args.note, &args.url)
        .with_context(|| format!("failed to remove URL from '{}'", title))?;

    if removed {
        println!("Removed URL from {}: {}", title, args.url.trim());
    } else {
        println!("{} has no URL {}", title, args.url.trim());
    }
    Ok(())
}

pub fn handle_show_urls(args: &NoteArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let listing = manager.list();
    let urls = manager.urls(&listing, &args.note)?;

    match args.format {
        OutputFormat::Human => {
            if urls.is_empty() {
                println!("No URLs.");
            }
            for url in urls {
                println!("{}", url);
            }
            Ok(())
        }
        OutputFormat::Json => Output::new(urls).print(),
    }
}
