//! Pure text classification over listing titles and descriptions: property
//! type, category bucket and square footage. City aliasing and the pet
//! filter live on [`crate::config::SearchConfig`] since they are table-driven.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{CategoryBucket, PropertyType};

/// Square footage outside this range is treated as noise and discarded.
pub const MIN_SQUARE_FEET: u32 = 200;
pub const MAX_SQUARE_FEET: u32 = 20000;

// Whole-word patterns for property type inference, with alternate spellings
// folded in. Matched against lower-cased text.
static RE_HOUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(house|single[\s-]family|sfr)\b").unwrap());
static RE_APARTMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(apartment|apt|studio)\b").unwrap());
static RE_CONDO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(condo|condominium)\b").unwrap());
static RE_TOWNHOUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(townhouse|town[\s-]house|townhome)\b").unwrap());
static RE_ADU: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(adu|granny[\s-]flat|in[\s-]law|guest[\s-]house)\b").unwrap());

static RE_SQFT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{3,5})\s*(?:sq\.?\s*ft\.?|sqft|sf)\b").unwrap());
static RE_SQFT_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{3,5})\s*-\s*sq\.?\s*ft\.?\b").unwrap());

impl PropertyType {
    /// Substring classification of an already-labelled value. Priority order
    /// matters: "house" must not swallow "townhouse".
    pub fn normalize(text: &str) -> PropertyType {
        let lower = text.to_lowercase().trim().to_string();
        if lower.contains("house") && !lower.contains("townhouse") {
            PropertyType::House
        } else if lower.contains("apartment") || lower.contains("apt") {
            PropertyType::Apartment
        } else if lower.contains("condo") {
            PropertyType::Condo
        } else if lower.contains("townhouse") || lower.contains("town house") {
            PropertyType::Townhouse
        } else if lower.contains("adu") {
            PropertyType::Adu
        } else {
            PropertyType::Other
        }
    }

    /// Whole-word inference over free text. First matching category wins, in
    /// the fixed order house, apartment, condo, townhouse, adu.
    pub fn infer(title: &str, description: &str) -> PropertyType {
        let combined = format!("{} {}", title, description).to_lowercase();
        if RE_HOUSE.is_match(&combined) {
            PropertyType::House
        } else if RE_APARTMENT.is_match(&combined) {
            PropertyType::Apartment
        } else if RE_CONDO.is_match(&combined) {
            PropertyType::Condo
        } else if RE_TOWNHOUSE.is_match(&combined) {
            PropertyType::Townhouse
        } else if RE_ADU.is_match(&combined) {
            PropertyType::Adu
        } else {
            PropertyType::Other
        }
    }

    pub fn bucket(self) -> CategoryBucket {
        match self {
            PropertyType::House | PropertyType::Adu => CategoryBucket::House,
            PropertyType::Apartment => CategoryBucket::Apartment,
            PropertyType::Condo | PropertyType::Townhouse => CategoryBucket::CondoTownhouse,
            PropertyType::Other => CategoryBucket::Other,
        }
    }
}

/// Best-effort square footage extraction. Returns only values that parse as
/// an integer inside [MIN_SQUARE_FEET, MAX_SQUARE_FEET]; anything else is
/// absent, never zero.
pub fn extract_square_feet(text: &str) -> Option<u32> {
    for pattern in [&*RE_SQFT, &*RE_SQFT_HYPHEN] {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(value) = caps[1].parse::<u32>() {
                if (MIN_SQUARE_FEET..=MAX_SQUARE_FEET).contains(&value) {
                    return Some(value);
                }
            }
        }
    }
    None
}
