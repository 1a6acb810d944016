use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized property type, inferred from listing title and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
    Adu,
    Other,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Adu => "adu",
            PropertyType::Other => "other",
        };
        f.write_str(s)
    }
}

/// Display grouping derived from [`PropertyType`]. Total mapping: every
/// property type lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryBucket {
    House,
    Apartment,
    #[serde(rename = "Condo & Townhouse")]
    CondoTownhouse,
    #[serde(rename = "Other / Unknown")]
    Other,
}

impl CategoryBucket {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryBucket::House => "House",
            CategoryBucket::Apartment => "Apartment",
            CategoryBucket::CondoTownhouse => "Condo & Townhouse",
            CategoryBucket::Other => "Other / Unknown",
        }
    }
}

impl fmt::Display for CategoryBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Triage state of a listing. Set to `New` at ingestion; only the status
/// update path may change it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    New,
    Love,
    Nope,
}

impl FromStr for ListingStatus {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(ListingStatus::New),
            "love" => Ok(ListingStatus::Love),
            "nope" => Ok(ListingStatus::Nope),
            other => Err(ScoutError::InvalidStatus(other.to_string())),
        }
    }
}

/// A single rental listing, built from one feed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Dedup key: `"<source>:<numeric-id>"`, timestamp fallback when the
    /// link carries no numeric id.
    pub listing_id: String,
    pub source: String,
    /// RFC 3339 string, set once at ingestion and never mutated.
    pub first_seen_at: String,
    pub city: String,
    /// `0` means the price could not be parsed from the title.
    pub price: u32,
    /// Defaults to `1` when unparseable (deliberate policy, not an unknown
    /// marker).
    pub bedrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub square_feet: Option<u32>,
    pub property_type: PropertyType,
    pub category_bucket: CategoryBucket,
    pub status: ListingStatus,
    pub address: String,
    pub url: String,
}

/// Combined result of one fan-out scrape across all configured cities.
/// Per-city failures are collected here, never propagated.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub listings: Vec<Listing>,
    pub errors: Vec<String>,
}

/// Report returned by the scrape trigger boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub success: bool,
    pub new_count: usize,
    pub total_fetched: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("failed to fetch {city}: {message}")]
    CityScrape { city: String, message: String },

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
