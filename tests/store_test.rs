mod common;

use std::path::PathBuf;

use common::sample_listing;
use rental_scout::display::group_listings;
use rental_scout::links::manual_links;
use rental_scout::types::ListingStatus;
use rental_scout::{JsonFileStore, ListingStore, MemoryStore, SearchConfig};

fn temp_store_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rental-scout-test-{}-{}.json",
        tag,
        std::process::id()
    ))
}

#[tokio::test]
async fn json_file_store_round_trips_listings() {
    let path = temp_store_path("roundtrip");
    let _ = tokio::fs::remove_file(&path).await;
    let store = JsonFileStore::new(&path);

    // Missing file reads as empty, not as an error.
    assert!(store.read_known_ids().await.unwrap().is_empty());
    assert!(store.read_all().await.unwrap().is_empty());

    let rows = vec![
        sample_listing("craigslist:1", "Calabasas", 2100),
        sample_listing("craigslist:2", "Oak Park", 2400),
    ];
    assert_eq!(store.append(&rows).await.unwrap(), 2);

    let known = store.read_known_ids().await.unwrap();
    assert!(known.contains("craigslist:1"));
    assert!(known.contains("craigslist:2"));

    let all = store.read_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].city, "Calabasas");

    // Appends accumulate rather than overwrite.
    store
        .append(&[sample_listing("craigslist:3", "Calabasas", 2000)])
        .await
        .unwrap();
    assert_eq!(store.read_all().await.unwrap().len(), 3);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn json_file_store_updates_status_in_place() {
    let path = temp_store_path("status");
    let _ = tokio::fs::remove_file(&path).await;
    let store = JsonFileStore::new(&path);

    store
        .append(&[sample_listing("craigslist:9", "Calabasas", 2100)])
        .await
        .unwrap();

    assert!(store
        .update_status("craigslist:9", ListingStatus::Love)
        .await
        .unwrap());
    let all = store.read_all().await.unwrap();
    assert_eq!(all[0].status, ListingStatus::Love);
    // Only the status cell changes.
    assert_eq!(all[0].first_seen_at, "2024-01-15T10:00:00+00:00");

    assert!(!store
        .update_status("craigslist:missing", ListingStatus::Nope)
        .await
        .unwrap());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn memory_store_reports_unknown_ids_on_status_update() {
    let store = MemoryStore::with_rows(vec![sample_listing("craigslist:5", "Calabasas", 2100)]);

    assert!(store
        .update_status("craigslist:5", ListingStatus::Nope)
        .await
        .unwrap());
    assert!(!store
        .update_status("craigslist:404", ListingStatus::Love)
        .await
        .unwrap());
}

#[test]
fn grouping_splits_by_status_bucket_and_city_sorted_by_price() {
    let mut loved = sample_listing("craigslist:1", "Calabasas", 2600);
    loved.status = ListingStatus::Love;
    let mut noped = sample_listing("craigslist:2", "Calabasas", 2500);
    noped.status = ListingStatus::Nope;

    let rows = vec![
        sample_listing("craigslist:3", "Calabasas", 2400),
        sample_listing("craigslist:4", "Calabasas", 2100),
        sample_listing("craigslist:5", "Oak Park", 2300),
        loved,
        noped,
    ];

    let grouped = group_listings(rows);

    let active = grouped.active.get("Apartment").unwrap();
    let calabasas = active.get("Calabasas").unwrap();
    assert_eq!(calabasas.len(), 2);
    // Cheapest first within a city.
    assert_eq!(calabasas[0].price, 2100);
    assert_eq!(calabasas[1].price, 2400);
    assert_eq!(active.get("Oak Park").unwrap().len(), 1);

    assert_eq!(grouped.loved["Apartment"]["Calabasas"].len(), 1);
    assert_eq!(grouped.noped["Apartment"]["Calabasas"].len(), 1);
}

#[test]
fn manual_links_interpolate_the_configured_filters() {
    let links = manual_links(&SearchConfig::default());
    assert_eq!(links.len(), 4);

    let zillow = &links[0];
    assert_eq!(zillow.source, "Zillow");
    assert!(zillow.url.contains("2000"));
    assert!(zillow.url.contains("2700"));

    let realtor = &links[1];
    assert!(realtor.url.contains("price-2000-2700"));
    assert!(realtor.url.contains("beds-1"));
}
