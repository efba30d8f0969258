//! Verify command - check access to the configured collection.

use console::style;

use bizcard_core::SyncClient;

use super::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let client = SyncClient::from_config(&config)?;

    let collection = client.describe_collection().await?;

    println!(
        "{} Collection verified: {}",
        style("✓").green(),
        collection.id
    );
    let title = collection.title_text();
    if !title.is_empty() {
        println!("Title: {}", title);
    }

    let missing: Vec<&str> = config
        .properties
        .all()
        .into_iter()
        .filter(|label| !collection.properties.contains_key(*label))
        .collect();

    if missing.is_empty() {
        println!("Properties: {}", style("all present").green());
    } else {
        println!(
            "{} Missing properties: {}",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    Ok(())
}
