//! Save command - create a contact record in the record store.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::debug;

use bizcard_core::{ContactRecord, SyncClient};

use super::load_config;

/// Arguments for the save command.
///
/// Field flags override values read from the record file.
#[derive(Args)]
pub struct SaveArgs {
    /// Record JSON file, as written by `scan --output`
    record: Option<PathBuf>,

    /// Person's name
    #[arg(long)]
    name: Option<String>,

    /// Company or organization
    #[arg(long)]
    company: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Free-form notes
    #[arg(long)]
    memo: Option<String>,

    /// Where the card was received
    #[arg(long)]
    place: Option<String>,

    /// When the card was received (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl SaveArgs {
    fn has_fields(&self) -> bool {
        self.name.is_some()
            || self.company.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.memo.is_some()
            || self.place.is_some()
            || self.date.is_some()
    }

    fn into_record(self) -> anyhow::Result<ContactRecord> {
        let mut record = match &self.record {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read record {}: {}", path.display(), e)
                })?;
                serde_json::from_str::<ContactRecord>(&content)?.without_store_fields()
            }
            None => ContactRecord::default(),
        };

        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(company) = self.company {
            record.company = company;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(phone) = self.phone {
            record.phone = phone;
        }
        if let Some(memo) = self.memo {
            record.memo = memo;
        }
        if let Some(place) = self.place {
            record.meeting_place = place;
        }
        if self.date.is_some() {
            record.meeting_date = self.date;
        }

        Ok(record)
    }
}

pub async fn run(args: SaveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.record.is_none() && !args.has_fields() {
        anyhow::bail!("Nothing to save. Pass a record file or at least one field flag.");
    }

    let config = load_config(config_path)?;
    let record = args.into_record()?;
    debug!("Saving record: {:?}", record);

    let client = SyncClient::from_config(&config)?;
    let id = client.save_record(&record).await?;

    println!("{} Saved record {}", style("✓").green(), id);

    Ok(())
}
