//! Display-layer grouping: stored listings arranged for triage browsing,
//! keyed by status class, then category bucket, then city, with cheapest
//! first inside each city.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Listing, ListingStatus};

pub type BucketMap = BTreeMap<String, BTreeMap<String, Vec<Listing>>>;

#[derive(Debug, Default, Serialize)]
pub struct GroupedListings {
    pub active: BucketMap,
    pub loved: BucketMap,
    pub noped: BucketMap,
}

pub fn group_listings(all: Vec<Listing>) -> GroupedListings {
    let mut grouped = GroupedListings::default();

    for listing in all {
        let group = match listing.status {
            ListingStatus::Love => &mut grouped.loved,
            ListingStatus::Nope => &mut grouped.noped,
            ListingStatus::New => &mut grouped.active,
        };

        group
            .entry(listing.category_bucket.label().to_string())
            .or_default()
            .entry(listing.city.clone())
            .or_default()
            .push(listing);
    }

    for group in [
        &mut grouped.active,
        &mut grouped.loved,
        &mut grouped.noped,
    ] {
        for cities in group.values_mut() {
            for listings in cities.values_mut() {
                listings.sort_by_key(|l| l.price);
            }
        }
    }

    grouped
}
