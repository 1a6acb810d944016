//! Listing persistence. The pipeline only needs a narrow row-store contract:
//! read known ids, append already-deduplicated rows, read everything back and
//! flip a status cell. A JSON file on disk implements it for real use; an
//! in-memory store backs the tests.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::types::{Listing, ListingStatus, Result, ScoutError};

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All previously ingested listing identifiers.
    async fn read_known_ids(&self) -> Result<HashSet<String>>;

    /// Append new rows. Callers pass already-deduplicated data, so no
    /// conflict resolution is needed. Returns the number of rows written.
    async fn append(&self, listings: &[Listing]) -> Result<usize>;

    async fn read_all(&self) -> Result<Vec<Listing>>;

    /// Update one listing's status. Returns `false` when the id is unknown.
    async fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<bool>;
}

/// Append-only JSON file store. The whole file is rewritten on each change;
/// fine for the few hundred rows this tool manages.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes load-modify-save cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Listing>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ScoutError::Store(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, listings: &[Listing]) -> Result<()> {
        let json = serde_json::to_string_pretty(listings)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            ScoutError::Store(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ListingStore for JsonFileStore {
    async fn read_known_ids(&self) -> Result<HashSet<String>> {
        let rows = self.load().await?;
        Ok(rows.into_iter().map(|l| l.listing_id).collect())
    }

    async fn append(&self, listings: &[Listing]) -> Result<usize> {
        if listings.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().await;
        let mut rows = self.load().await?;
        rows.extend(listings.iter().cloned());
        self.save(&rows).await?;

        info!(count = listings.len(), path = %self.path.display(), "appended listings");
        Ok(listings.len())
    }

    async fn read_all(&self) -> Result<Vec<Listing>> {
        self.load().await
    }

    async fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.load().await?;

        let Some(row) = rows.iter_mut().find(|l| l.listing_id == listing_id) else {
            debug!(listing_id, "status update for unknown listing");
            return Ok(false);
        };

        row.status = status;
        self.save(&rows).await?;
        Ok(true)
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Listing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Listing>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn read_known_ids(&self) -> Result<HashSet<String>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().map(|l| l.listing_id.clone()).collect())
    }

    async fn append(&self, listings: &[Listing]) -> Result<usize> {
        let mut rows = self.rows.write().await;
        rows.extend(listings.iter().cloned());
        Ok(listings.len())
    }

    async fn read_all(&self) -> Result<Vec<Listing>> {
        Ok(self.rows.read().await.clone())
    }

    async fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|l| l.listing_id == listing_id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
