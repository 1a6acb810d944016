pub mod classify;
pub mod config;
pub mod display;
pub mod fetch;
pub mod ingest;
pub mod links;
pub mod parser;
pub mod scrape;
pub mod store;
pub mod types;

pub use config::{FetchConfig, SearchConfig};
pub use fetch::{FeedFetcher, FeedTransport, HttpTransport};
pub use ingest::{filter_new, run_scrape, run_triggered_scrape};
pub use parser::parse_city_feed;
pub use scrape::CityScraper;
pub use store::{JsonFileStore, ListingStore, MemoryStore};
pub use types::{
    CategoryBucket, Listing, ListingStatus, PropertyType, Result, ScoutError, ScrapeOutcome,
    ScrapeReport,
};
