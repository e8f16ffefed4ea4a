use anyhow::{Context, Result};
use clap::Parser;
use mdblock_config::Config;
use mdblock_engine::Document;
use std::path::{Path, PathBuf};

mod cli;
mod commands;

use cli::{Cli, Command};

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match config {
        Some(config) => Ok(config),
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn read_document(path: &Path, tab_size: usize) -> Result<Document> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = Document::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    Ok(doc.with_tab_size(tab_size))
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let tab_size = cli.tab_size.unwrap_or(config.tab_size);
    let resolve = |file: &PathBuf| config.resolve_document_path(file);

    match cli.command {
        Command::Blocks { file, json } => {
            let doc = read_document(&resolve(&file), tab_size)?;
            println!("{}", commands::blocks(&doc, json)?);
        }
        Command::Validate { file, drop } => {
            let doc = read_document(&resolve(&file), tab_size)?;
            let result = commands::validate(&doc, &drop)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Move { file, drop, write } => {
            let path = resolve(&file);
            let doc = read_document(&path, tab_size)?;
            let (outcome, moved) =
                commands::perform_move(&doc, &drop, config.renumber_ordered_lists)?;
            match (moved, write) {
                (Some(moved), true) => {
                    std::fs::write(&path, moved.to_bytes())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!(
                        "Moved line {} to line {} in {}",
                        drop.source,
                        drop.target,
                        path.display()
                    );
                }
                (moved, _) => {
                    println!("{}", commands::move_report(&outcome, moved.as_ref())?);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    run(Cli::parse())
}
