//! Setup handlers (init, init-git, config).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::config::Config;
use crate::cli::{ConfigArgs, InitArgs};
use crate::infra::{InitOutcome, init_repository, is_repository};

pub fn handle_init(
    args: &InitArgs,
    config: &Config,
    config_path: &Path,
    notes_dir: &Path,
) -> Result<()> {
    let storage_dir = match &args.storage_dir {
        Some(dir) => absolute(dir)?,
        None => absolute(notes_dir)?,
    };

    std::fs::create_dir_all(&storage_dir).with_context(|| {
        format!("failed to create notes directory: {}", storage_dir.display())
    })?;
    println!("Notes directory: {}", storage_dir.display());

    let updated = Config {
        storage_dir: Some(storage_dir.clone()),
    };
    if &updated != config {
        updated.save_to(config_path)?;
        println!("Saved configuration to {}", config_path.display());
    }

    match init_repository(&storage_dir) {
        Ok(outcome) => report_git(&storage_dir, &outcome),
        Err(e) => warn!(error = %e, "notes directory is not under version control"),
    }
    Ok(())
}

pub fn handle_init_git(notes_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(notes_dir)
        .with_context(|| format!("failed to create notes directory: {}", notes_dir.display()))?;

    let outcome = init_repository(notes_dir).with_context(|| {
        format!(
            "failed to initialize git repository in {}",
            notes_dir.display()
        )
    })?;
    report_git(notes_dir, &outcome);
    Ok(())
}

fn report_git(dir: &Path, outcome: &InitOutcome) {
    if outcome.created_repository {
        println!("Initialized git repository in {}", dir.display());
    } else {
        println!("Git repository already exists in {}", dir.display());
    }
    if outcome.created_gitignore {
        println!("Created .gitignore");
    }
}

pub fn handle_config(
    args: &ConfigArgs,
    config: &Config,
    config_path: &Path,
    notes_dir: &Path,
) -> Result<()> {
    if let Some(dir) = &args.storage_dir {
        let updated = Config {
            storage_dir: Some(absolute(dir)?),
        };
        updated.save_to(config_path)?;
        println!("Saved configuration to {}", config_path.display());
        println!("storage_dir = {}", updated.storage_dir(None).display());
        return Ok(());
    }

    let status = if config_path.exists() {
        ""
    } else {
        " (not created yet)"
    };
    println!("config file = {}{}", config_path.display(), status);
    println!("storage_dir = {}", notes_dir.display());
    if config.storage_dir.is_none() {
        println!("  (default; set with `jot config --storage-dir <DIR>`)");
    }
    println!(
        "git = {}",
        if is_repository(notes_dir) {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).with_context(|| format!("invalid directory: {}", dir.display()))
}
