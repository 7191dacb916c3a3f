//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Prints the wrapped data as pretty JSON on stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    /// Number to use in the next command, absent for missing notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A note with its derived relationships, for `read --format json`.
#[derive(Debug, Serialize)]
pub struct NoteDetail<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(flatten)]
    pub note: &'a Note,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub back_references: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_links: Vec<&'a str>,
}

/// Formats a listing line: `3. Title [tag, tag]`.
pub fn format_listing_line(position: Option<usize>, title: &str, tags: &[String]) -> String {
    let mut line = match position {
        Some(position) => format!("{}. {}", position, title),
        None => format!("-. {}", title),
    };
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}
