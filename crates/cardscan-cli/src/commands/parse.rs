//! Parse command - extract contact details from recognized text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cardscan_core::{CardRepository, CardService, JsonFileRepository, MemoryRepository, StaticRecognizer};

use super::load_config;
use super::output::{emit, format_outcome, print_warnings, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file with OCR output (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Persist the extracted contact
    #[arg(long)]
    save: bool,

    /// Contact store file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Show parsing warnings and timing
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    info!("Parsing {} characters of text", text.chars().count());

    let repository: Box<dyn CardRepository> = if args.save {
        let store = args.store.clone().unwrap_or_else(|| config.storage.path.clone());
        Box::new(JsonFileRepository::open(store)?)
    } else {
        Box::new(MemoryRepository::new())
    };

    // Text is already recognized; the recognizer is never called
    let service = CardService::from_config(StaticRecognizer::default(), repository, &config)
        .with_persist(args.save);
    let outcome = service.process_text(&text)?;

    if let Some(stored) = &outcome.stored {
        eprintln!("{} Stored card #{}", style("✓").green(), stored.id);
    }

    let output = format_outcome(&outcome, args.format)?;
    emit(&output, args.output.as_deref())?;

    if args.show_warnings {
        print_warnings(&outcome);
    }

    Ok(())
}
