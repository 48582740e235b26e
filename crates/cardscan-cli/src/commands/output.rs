//! Output formatting shared by the process, parse and list commands.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use cardscan_core::{ContactRecord, ProcessOutcome, StoredContact};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// One CSV row; unsaved records leave id and created_at empty.
#[derive(Serialize)]
struct CsvRow<'a> {
    id: Option<u64>,
    created_at: Option<String>,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(contact: &'a ContactRecord, id: Option<u64>, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            created_at: created_at.map(|t| t.to_rfc3339()),
            name: contact.name().unwrap_or_default(),
            email: contact.email().unwrap_or_default(),
            phone: contact.phone().unwrap_or_default(),
            company: contact.company().unwrap_or_default(),
        }
    }
}

/// Format the result of processing a single card.
pub fn format_outcome(outcome: &ProcessOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match (format, &outcome.stored) {
        (OutputFormat::Json, Some(stored)) => Ok(serde_json::to_string_pretty(stored)?),
        (OutputFormat::Json, None) => Ok(serde_json::to_string_pretty(&outcome.contact)?),
        (OutputFormat::Csv, Some(stored)) => format_csv(std::slice::from_ref(stored)),
        (OutputFormat::Csv, None) => {
            write_csv([CsvRow::new(&outcome.contact, None, None)])
        }
        (OutputFormat::Text, Some(stored)) => Ok(format_text(stored)),
        (OutputFormat::Text, None) => Ok(format_fields(&outcome.contact)),
    }
}

/// Format stored records.
pub fn format_stored(records: &[StoredContact], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(records
            .iter()
            .map(format_text)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Write output to a file, or to stdout when no path is given.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = path {
        fs::write(output_path, output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }
    Ok(())
}

/// Print parsing warnings and timing to stderr.
pub fn print_warnings(outcome: &ProcessOutcome) {
    for warning in &outcome.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
    eprintln!(
        "{} OCR time: {}ms, extraction time: {}ms",
        style("ℹ").blue(),
        outcome.ocr_time_ms,
        outcome.parse_time_ms
    );
}

fn format_csv(records: &[StoredContact]) -> anyhow::Result<String> {
    write_csv(
        records
            .iter()
            .map(|r| CsvRow::new(&r.contact, Some(r.id.0), Some(r.created_at))),
    )
}

fn write_csv<'a>(rows: impl IntoIterator<Item = CsvRow<'a>>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut written = false;

    for row in rows {
        wtr.serialize(row)?;
        written = true;
    }

    // Header only comes from the first serialized row
    if !written {
        wtr.write_record(["id", "created_at", "name", "email", "phone", "company"])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(stored: &StoredContact) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Card #{} ({})\n",
        stored.id,
        stored.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format_fields(&stored.contact));
    output
}

fn format_fields(contact: &ContactRecord) -> String {
    let fields = [
        ("Name", contact.name()),
        ("Email", contact.email()),
        ("Phone", contact.phone()),
        ("Company", contact.company()),
    ];

    let mut output = String::new();
    for (label, value) in fields {
        output.push_str(&format!("  {:<8} {}\n", format!("{}:", label), value.unwrap_or("-")));
    }
    output
}
