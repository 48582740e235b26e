//! List command - show stored contacts.

use std::path::PathBuf;

use clap::Args;
use console::style;

use cardscan_core::{CardRepository, JsonFileRepository};

use super::load_config;
use super::output::{emit, format_stored, OutputFormat};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Contact store file
    #[arg(long)]
    store: Option<PathBuf>,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = args.store.unwrap_or(config.storage.path);

    let repository = JsonFileRepository::open(&store)?;
    let records = repository.list_all()?;

    if records.is_empty() {
        eprintln!(
            "{} No stored cards in {}",
            style("ℹ").blue(),
            store.display()
        );
    }

    let output = format_stored(&records, args.format)?;
    emit(&output, args.output.as_deref())?;

    Ok(())
}
