use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use rental_scout::display::group_listings;
use rental_scout::links::manual_links;
use rental_scout::{
    run_triggered_scrape, CityScraper, FetchConfig, JsonFileStore, ListingStatus, ListingStore,
    SearchConfig,
};

#[derive(Parser)]
#[command(name = "rental-scout", about = "Rental listing scraper and triage store")]
struct Cli {
    /// Path of the JSON listing store.
    #[arg(long, default_value = "listings.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one scrape across all configured cities and append new listings.
    Scrape {
        /// Shared secret presented by the trigger.
        #[arg(long)]
        token: Option<String>,

        /// Expected shared secret.
        #[arg(long, env = "SCOUT_CRON_SECRET", hide_env_values = true)]
        secret: String,
    },
    /// Print stored listings grouped by status, category bucket and city.
    Listings,
    /// Update one listing's triage status.
    Status {
        listing_id: String,
        /// One of: new, love, nope.
        status: String,
    },
    /// Print manual search links for sites without feeds.
    Links,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let search = SearchConfig::default();
    let store = JsonFileStore::new(&cli.store);

    match cli.command {
        Command::Scrape { token, secret } => {
            let scraper = CityScraper::new(search, FetchConfig::default());
            let report =
                run_triggered_scrape(token.as_deref(), &secret, &scraper, &store).await?;

            info!(
                new = report.new_count,
                fetched = report.total_fetched,
                errors = report.errors.len(),
                "scrape finished"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Listings => {
            let all = store.read_all().await.context("failed to read store")?;
            let grouped = group_listings(all);
            println!("{}", serde_json::to_string_pretty(&grouped)?);
        }
        Command::Status { listing_id, status } => {
            let status = ListingStatus::from_str(&status)?;
            let found = store.update_status(&listing_id, status).await?;
            if found {
                println!("updated {}", listing_id);
            } else {
                anyhow::bail!("listing not found: {}", listing_id);
            }
        }
        Command::Links => {
            println!("{}", serde_json::to_string_pretty(&manual_links(&search))?);
        }
    }

    Ok(())
}
