//! CLI application for scanning business cards and syncing them to a record store.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, list, save, scan, verify};

/// Business card scanner - Extract contact fields and keep them in a record store
#[derive(Parser)]
#[command(name = "bizcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize a card image and print the extracted fields
    Scan(scan::ScanArgs),

    /// Save a contact record to the record store
    Save(save::SaveArgs),

    /// List stored contact records
    List(list::ListArgs),

    /// Check access to the configured collection
    Verify,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays parseable
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Scan(args) => scan::run(args, config_path).await,
        Commands::Save(args) => save::run(args, config_path).await,
        Commands::List(args) => list::run(args, config_path).await,
        Commands::Verify => verify::run(config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
