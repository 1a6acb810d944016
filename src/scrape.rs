//! City fan-out orchestration. All configured cities are fetched and parsed
//! concurrently; each city is its own failure domain and the join waits for
//! every one to settle before combining results.

use futures::future::join_all;
use tracing::{error, info};

use crate::config::{FetchConfig, SearchConfig};
use crate::fetch::{FeedFetcher, FeedTransport, HttpTransport};
use crate::parser::parse_city_feed;
use crate::types::{Listing, Result, ScoutError, ScrapeOutcome};

pub struct CityScraper<T: FeedTransport> {
    fetcher: FeedFetcher<T>,
    search: SearchConfig,
}

impl CityScraper<HttpTransport> {
    pub fn new(search: SearchConfig, fetch: FetchConfig) -> Self {
        Self {
            fetcher: FeedFetcher::new(fetch),
            search,
        }
    }
}

impl<T: FeedTransport> CityScraper<T> {
    pub fn with_transport(transport: T, search: SearchConfig, fetch: FetchConfig) -> Self {
        Self {
            fetcher: FeedFetcher::with_transport(transport, fetch),
            search,
        }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    pub fn transport_ref(&self) -> &T {
        self.fetcher.transport_ref()
    }

    /// Fetch and parse one city's feed. Fetch exhaustion and parse failures
    /// both surface as a per-city error tagged with the query.
    pub async fn scrape_city(&self, city_query: &str) -> Result<Vec<Listing>> {
        let urls = self.search.feed_url_variants(city_query);
        let document = self
            .fetcher
            .fetch_first(&urls)
            .await
            .map_err(|e| tag_city(city_query, e))?;

        parse_city_feed(&document, city_query, &self.search).map_err(|e| tag_city(city_query, e))
    }

    /// Fan-out across every configured city, concurrently, and settle-all:
    /// one city failing never cancels or hides its siblings. Returns the
    /// combined listings plus the collected per-city error messages.
    pub async fn scrape_all(&self) -> ScrapeOutcome {
        let results = join_all(
            self.search
                .locations
                .iter()
                .map(|city| self.scrape_city(city)),
        )
        .await;

        let mut outcome = ScrapeOutcome::default();
        for result in results {
            match result {
                Ok(listings) => outcome.listings.extend(listings),
                Err(e) => {
                    error!("city scrape failed: {}", e);
                    outcome.errors.push(e.to_string());
                }
            }
        }

        info!(
            listings = outcome.listings.len(),
            errors = outcome.errors.len(),
            "scrape fan-out settled"
        );
        outcome
    }
}

fn tag_city(city: &str, error: ScoutError) -> ScoutError {
    match error {
        tagged @ ScoutError::CityScrape { .. } => tagged,
        other => ScoutError::CityScrape {
            city: city.to_string(),
            message: other.to_string(),
        },
    }
}
