//! Process command - extract contact details from a business card image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardscan_core::ocr::create_engine;
use cardscan_core::{CardRepository, CardService, JsonFileRepository, MemoryRepository};

use super::load_config;
use super::output::{emit, format_outcome, print_warnings, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image (PNG, JPG, JPEG, BMP, TIFF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Contact store file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Do not persist the extracted contact
    #[arg(long)]
    no_save: bool,

    /// Show parsing warnings and timing
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading models...");
    pb.set_position(10);
    let engine = create_engine(&config.ocr)?;

    pb.set_message("Opening store...");
    pb.set_position(30);
    let repository: Box<dyn CardRepository> = if args.no_save {
        Box::new(MemoryRepository::new())
    } else {
        let store = args.store.clone().unwrap_or_else(|| config.storage.path.clone());
        Box::new(JsonFileRepository::open(store)?)
    };

    let service =
        CardService::from_config(engine, repository, &config).with_persist(!args.no_save);

    pb.set_message("Reading image...");
    pb.set_position(40);
    let data = fs::read(&args.input)?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    pb.set_message("Running OCR...");
    pb.set_position(50);
    let outcome = match service.process_upload(&file_name, &data) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };

    pb.finish_with_message("Done");
    debug!("Recognized text:\n{}", outcome.raw_text);

    if let Some(stored) = &outcome.stored {
        eprintln!("{} Stored card #{}", style("✓").green(), stored.id);
    }

    let output = format_outcome(&outcome, args.format)?;
    emit(&output, args.output.as_deref())?;

    if args.show_warnings {
        print_warnings(&outcome);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
