//! jotter - JSON notes with references, URLs and search

pub mod cli;
pub mod domain;
pub mod infra;
pub mod manager;
pub mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_add_ref, handle_add_url, handle_advanced_search, handle_completions,
        handle_config, handle_create, handle_delete, handle_field_search, handle_init,
        handle_init_git, handle_list, handle_read, handle_remove_ref, handle_remove_url,
        handle_rename, handle_search, handle_show_back_refs, handle_show_refs, handle_show_urls,
        handle_update,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config_file.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)?;
    let notes_dir = config.storage_dir(cli.dir.as_ref());

    match &cli.command {
        Command::Init(args) => handle_init(args, &config, &config_path, &notes_dir),
        Command::InitGit => handle_init_git(&notes_dir),
        Command::Config(args) => handle_config(args, &config, &config_path, &notes_dir),
        Command::Create(args) => handle_create(args, &notes_dir),
        Command::Read(args) => handle_read(args, &notes_dir),
        Command::Update(args) => handle_update(args, &notes_dir),
        Command::Rename(args) => handle_rename(args, &notes_dir),
        Command::Delete(args) => handle_delete(args, &notes_dir),
        Command::List(args) => handle_list(args, &notes_dir),
        Command::AddRef(args) => handle_add_ref(args, &notes_dir),
        Command::RemoveRef(args) => handle_remove_ref(args, &notes_dir),
        Command::ShowRefs(args) => handle_show_refs(args, &notes_dir),
        Command::ShowBackRefs(args) => handle_show_back_refs(args, &notes_dir),
        Command::AddUrl(args) => handle_add_url(args, &notes_dir),
        Command::RemoveUrl(args) => handle_remove_url(args, &notes_dir),
        Command::ShowUrls(args) => handle_show_urls(args, &notes_dir),
        Command::Search(args) => handle_search(args, &notes_dir),
        Command::FieldSearch(args) => handle_field_search(args, &notes_dir),
        Command::AdvancedSearch(args) => handle_advanced_search(args, &notes_dir),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
