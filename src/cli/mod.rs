//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::NoteRef;
use crate::manager::SearchField;
use output::OutputFormat;

/// jot - JSON notes with references, URLs and search
///
/// NOTE arguments accept a title or the number shown by `list` or a search.
#[derive(Parser, Debug)]
#[command(name = "jot", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides the config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Use an alternate config file
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the notes directory, save it in the config and set up git
    Init(InitArgs),

    /// Initialize a git repository in the notes directory
    InitGit,

    /// Show or change configuration
    Config(ConfigArgs),

    /// Create a new note
    #[command(visible_alias = "add")]
    Create(CreateArgs),

    /// Show a note
    #[command(visible_alias = "show")]
    Read(ReadArgs),

    /// Change a note's content, origin or tags
    Update(UpdateArgs),

    /// Give a note a new title, updating notes that reference it
    #[command(visible_alias = "mv")]
    Rename(RenameArgs),

    /// Delete a note and remove references to it
    #[command(visible_aliases = ["del", "rm"])]
    Delete(DeleteArgs),

    /// List all notes
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Add a reference from one note to another
    AddRef(RefArgs),

    /// Remove a reference from one note to another
    RemoveRef(RefArgs),

    /// Show the notes a note references
    ShowRefs(NoteArgs),

    /// Show the notes that reference a note
    ShowBackRefs(NoteArgs),

    /// Attach a URL to a note
    AddUrl(UrlArgs),

    /// Detach a URL from a note
    RemoveUrl(UrlArgs),

    /// Show the URLs attached to a note
    ShowUrls(NoteArgs),

    /// Search every field of every note
    Search(SearchArgs),

    /// Search a single field
    FieldSearch(FieldSearchArgs),

    /// Search with several criteria that must all match
    AdvancedSearch(AdvancedSearchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Notes directory to create (defaults to the configured one)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,
}

/// Arguments for the `config` command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Set the notes directory
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,
}

/// Arguments for the `create` command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Note title
    pub title: String,

    /// Note content
    #[arg(short, long, default_value = "")]
    pub content: String,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Where the note came from
    #[arg(short, long)]
    pub origin: Option<String>,
}

/// Arguments for the `read` command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Note title or number
    pub note: NoteRef,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `update` command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Note title or number
    pub note: NoteRef,

    /// Replace the content
    #[arg(short, long)]
    pub content: Option<String>,

    /// Replace the origin (an empty value clears it)
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Tag to add (can be specified multiple times)
    #[arg(long = "add-tag", action = ArgAction::Append)]
    pub add_tags: Vec<String>,

    /// Tag to remove (can be specified multiple times)
    #[arg(long = "remove-tag", action = ArgAction::Append)]
    pub remove_tags: Vec<String>,
}

/// Arguments for the `rename` command
#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Note title or number
    pub note: NoteRef,

    /// New title
    pub new_title: String,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Note title or number
    pub note: NoteRef,
}

/// Arguments for the `list` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for commands taking a single note
#[derive(Parser, Debug)]
pub struct NoteArgs {
    /// Note title or number
    pub note: NoteRef,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `add-ref` and `remove-ref`
#[derive(Parser, Debug)]
pub struct RefArgs {
    /// Referencing note title or number
    pub note: NoteRef,

    /// Referenced note title or number
    pub target: NoteRef,
}

/// Arguments for `add-url` and `remove-url`
#[derive(Parser, Debug)]
pub struct UrlArgs {
    /// Note title or number
    pub note: NoteRef,

    /// URL
    pub url: String,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (case-insensitive)
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Field selector for `field-search`
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FieldArg {
    Content,
    Title,
    Tag,
    Link,
}

impl From<FieldArg> for SearchField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Content => SearchField::Content,
            FieldArg::Title => SearchField::Title,
            FieldArg::Tag => SearchField::Tag,
            FieldArg::Link => SearchField::Link,
        }
    }
}

/// Arguments for the `field-search` command
#[derive(Parser, Debug)]
pub struct FieldSearchArgs {
    /// Field to search
    #[arg(value_enum)]
    pub field: FieldArg,

    /// Search query (case-insensitive)
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `advanced-search` command
#[derive(Parser, Debug)]
pub struct AdvancedSearchArgs {
    /// Text the content must contain
    #[arg(long)]
    pub content: Option<String>,

    /// Text the title must contain
    #[arg(long)]
    pub title: Option<String>,

    /// Text a tag must contain
    #[arg(long)]
    pub tag: Option<String>,

    /// Text a reference or content URL must contain
    #[arg(long)]
    pub link: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
