//! List command - show stored contact records.

use clap::Args;
use console::style;

use bizcard_core::{ContactRecord, SyncClient};

use super::load_config;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array
    Json,
    /// One line per record
    Text,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let client = SyncClient::from_config(&config)?;

    let records = client.list_records().await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => print_text(&records),
    }

    Ok(())
}

fn print_text(records: &[ContactRecord]) {
    if records.is_empty() {
        println!("{} No records found.", style("ℹ").blue());
        return;
    }

    for record in records {
        println!("{}", format_line(record));
    }

    println!();
    println!("{} record(s)", records.len());
}

fn format_line(record: &ContactRecord) -> String {
    let date = record
        .meeting_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());

    let mut line = format!("{}  {}", date, style(&record.name).bold());
    for value in [&record.company, &record.email, &record.phone] {
        if !value.is_empty() {
            line.push_str(" | ");
            line.push_str(value);
        }
    }
    line
}
