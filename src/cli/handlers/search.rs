//! Search handlers.

use anyhow::Result;
use std::path::Path;

use super::{open_manager, print_hits};
use crate::cli::{AdvancedSearchArgs, FieldSearchArgs, SearchArgs};
use crate::manager::SearchCriteria;

const NO_MATCHES: &str = "No matching notes.";

pub fn handle_search(args: &SearchArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let hits = manager.search(&args.query);
    print_hits(&manager, &hits, args.format, NO_MATCHES)
}

pub fn handle_field_search(args: &FieldSearchArgs, notes_dir: &Path) -> Result<()> {
    let manager = open_manager(notes_dir)?;
    let hits = manager.field_search(args.field.into(), &args.query);
    print_hits(&manager, &hits, args.format, NO_MATCHES)
}

pub fn handle_advanced_search(args: &AdvancedSearchArgs, notes_dir: &Path) -> Result<()> {
    let criteria = SearchCriteria {
        content: args.content.clone(),
        title: args.title.clone(),
        tag: args.tag.clone(),
        link: args.link.clone(),
    };

    let manager = open_manager(notes_dir)?;
    let hits = manager.advanced_search(&criteria);
    print_hits(&manager, &hits, args.format, NO_MATCHES)
}
