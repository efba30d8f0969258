//! Scan command - extract contact fields from a card image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info, warn};

use bizcard_core::extract::FieldExtractor;
use bizcard_core::ocr::{CardScanner, PureOcrRecognizer};
use bizcard_core::ContactRecord;

use super::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Card image (PNG, JPEG, ...)
    #[arg(required = true)]
    image: PathBuf,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Print the raw draft, including the recognized text
    #[arg(long)]
    raw: bool,

    /// Write the editable record to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if !args.image.exists() {
        anyhow::bail!("Input file not found: {}", args.image.display());
    }

    if let Some(dir) = &args.model_dir {
        config.ocr.model_dir = dir.clone();
    }

    info!("Scanning {}", args.image.display());
    let image = image::open(&args.image)?;

    let recognizer = PureOcrRecognizer::from_config(&config.ocr)?;
    let scanner = CardScanner::new(recognizer)
        .with_extractor(FieldExtractor::from_config(&config.extraction));
    let draft = scanner.scan(&image)?;

    if draft.is_empty() {
        warn!("No contact fields recognized in {}", args.image.display());
    }

    let output = if args.raw {
        serde_json::to_string_pretty(&draft)?
    } else {
        serde_json::to_string_pretty(&ContactRecord::from_draft(&draft))?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Record written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total scan time: {:?}", start.elapsed());

    Ok(())
}
