//! Deduplication gate and the scrape trigger boundary.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::fetch::FeedTransport;
use crate::scrape::CityScraper;
use crate::store::ListingStore;
use crate::types::{Listing, Result, ScoutError, ScrapeReport};

/// Pure set-difference against the known-id set. Candidates whose id is
/// already known are discarded; ids within one batch are not deduplicated
/// against each other since source-native ids should not collide in a run.
pub fn filter_new(candidates: Vec<Listing>, known_ids: &HashSet<String>) -> Vec<Listing> {
    candidates
        .into_iter()
        .filter(|l| !known_ids.contains(&l.listing_id))
        .collect()
}

/// Shared-secret check for the cron trigger. Must pass before any scraping
/// starts. An unset expected secret rejects everything.
pub fn authorize(provided: Option<&str>, expected: &str) -> Result<()> {
    if expected.is_empty() || provided != Some(expected) {
        return Err(ScoutError::Unauthorized);
    }
    Ok(())
}

/// One full pipeline run: snapshot known ids, fan out the scrape, gate the
/// candidates and append the remainder. Per-city errors ride along in the
/// report; a store failure aborts the whole run.
pub async fn run_scrape<T: FeedTransport>(
    scraper: &CityScraper<T>,
    store: &dyn ListingStore,
) -> Result<ScrapeReport> {
    let known_ids = store.read_known_ids().await?;
    let outcome = scraper.scrape_all().await;

    let total_fetched = outcome.listings.len();
    let fresh = filter_new(outcome.listings, &known_ids);
    let new_count = store.append(&fresh).await?;

    info!(new_count, total_fetched, "scrape run complete");

    Ok(ScrapeReport {
        success: true,
        new_count,
        total_fetched,
        errors: outcome.errors,
    })
}

/// The cron-facing boundary: authenticate, then run. Auth failures propagate
/// as errors (the caller answers 401 before anything is fetched); pipeline
/// failures are folded into a `success: false` report.
pub async fn run_triggered_scrape<T: FeedTransport>(
    provided_secret: Option<&str>,
    expected_secret: &str,
    scraper: &CityScraper<T>,
    store: &dyn ListingStore,
) -> Result<ScrapeReport> {
    authorize(provided_secret, expected_secret)?;

    match run_scrape(scraper, store).await {
        Ok(report) => Ok(report),
        Err(e) => {
            warn!("scrape run failed: {}", e);
            Ok(ScrapeReport {
                success: false,
                new_count: 0,
                total_fetched: 0,
                errors: vec![e.to_string()],
            })
        }
    }
}
