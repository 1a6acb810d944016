//! Feed parsing and listing construction. Turns one raw feed document into
//! candidate [`Listing`] records for a single city query, applying the pet
//! filter and the text classifier along the way.

use chrono::Utc;
use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::classify::extract_square_feet;
use crate::config::SearchConfig;
use crate::types::{Listing, ListingStatus, PropertyType, Result, ScoutError};

/// Tag identifying the origin feed in `source` and in listing ids.
pub const SOURCE_TAG: &str = "craigslist";

/// Policy default when the title carries no `<n>br` marker. Deliberately
/// indistinguishable from a genuine one-bedroom listing.
pub const DEFAULT_BEDROOMS: u32 = 1;

/// Sentinel for "price not parsed".
pub const UNPARSED_PRICE: u32 = 0;

static RE_PRICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());
static RE_BEDROOMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)br").unwrap());
static RE_LISTING_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)\.html").unwrap());

/// Parse a raw feed document and build listing candidates for one city
/// query. A malformed document fails the whole per-city operation; items
/// that trip the pet filter are dropped silently.
pub fn parse_city_feed(
    document: &str,
    city_query: &str,
    config: &SearchConfig,
) -> Result<Vec<Listing>> {
    let feed = parser::parse(document.as_bytes())
        .map_err(|e| ScoutError::Parse(format!("failed to parse feed: {}", e)))?;

    let mut listings = Vec::new();
    let mut dropped = 0usize;

    for entry in feed.entries {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let url = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();
        let description = entry.summary.map(|s| s.content).unwrap_or_default();
        let first_seen_at = entry
            .published
            .or(entry.updated)
            .unwrap_or_else(Utc::now)
            .to_rfc3339();

        if config.is_no_pets(&title) || config.is_no_pets(&description) {
            dropped += 1;
            continue;
        }

        listings.push(build_listing(
            &title,
            &url,
            &description,
            first_seen_at,
            city_query,
            config,
        ));
    }

    if dropped > 0 {
        debug!(city = city_query, dropped, "dropped no-pets listings");
    }
    info!(city = city_query, count = listings.len(), "parsed feed items");

    Ok(listings)
}

fn build_listing(
    title: &str,
    url: &str,
    description: &str,
    first_seen_at: String,
    city_query: &str,
    config: &SearchConfig,
) -> Listing {
    let price = RE_PRICE
        .captures(title)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(UNPARSED_PRICE);

    let bedrooms = RE_BEDROOMS
        .captures(title)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(DEFAULT_BEDROOMS);

    let city = config.normalize_city(&resolve_city(title, city_query, config));

    let property_type = PropertyType::infer(title, description);
    let combined = format!("{} {}", title, description);
    let square_feet = extract_square_feet(&combined);

    Listing {
        listing_id: derive_listing_id(url),
        source: SOURCE_TAG.to_string(),
        first_seen_at,
        city,
        price,
        bedrooms,
        square_feet,
        property_type,
        category_bucket: property_type.bucket(),
        status: ListingStatus::New,
        address: derive_address(title),
        url: url.to_string(),
    }
}

/// First configured location appearing in the title wins; otherwise the
/// query's own city stands.
fn resolve_city(title: &str, city_query: &str, config: &SearchConfig) -> String {
    let title_lower = title.to_lowercase();
    config
        .locations
        .iter()
        .find(|loc| title_lower.contains(&loc.to_lowercase()))
        .cloned()
        .unwrap_or_else(|| city_query.to_string())
}

/// `"<source>:<numeric-id>"` from the `/<digits>.html` path segment. Falls
/// back to the current timestamp when the link carries no id, accepting a
/// small collision risk.
fn derive_listing_id(url: &str) -> String {
    match RE_LISTING_ID.captures(url) {
        Some(caps) => format!("{}:{}", SOURCE_TAG, &caps[1]),
        None => format!("{}:{}", SOURCE_TAG, Utc::now().timestamp_millis()),
    }
}

/// Title with its first hyphen-delimited segment stripped (typically the
/// price/location prefix). Falls back to the full title when nothing remains.
fn derive_address(title: &str) -> String {
    let remainder = title
        .splitn(2, '-')
        .nth(1)
        .map(str::trim)
        .unwrap_or_default();
    if remainder.is_empty() {
        title.to_string()
    } else {
        remainder.to_string()
    }
}
