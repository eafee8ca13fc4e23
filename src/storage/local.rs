//! Local filesystem storage implementation.
//!
//! Keeps every listing in a single `listings.json` document under the
//! storage root. Writes go through a temp file and a rename so readers
//! never observe a half-written document.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Listing;
use crate::storage::{ListingStore, ListingsData};

const LISTINGS_KEY: &str = "listings.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ListingStore for LocalStorage {
    async fn load_listings(&self) -> Result<Vec<Listing>> {
        match self.read_json::<ListingsData>(LISTINGS_KEY).await? {
            Some(data) => {
                log::info!(
                    "Loaded {} listings (updated {})",
                    data.listings.len(),
                    data.updated_at
                );
                Ok(data.listings)
            }
            None => {
                log::warn!("No listings found at {}", self.path(LISTINGS_KEY).display());
                Ok(Vec::new())
            }
        }
    }

    async fn save_listings(&self, listings: &[Listing]) -> Result<()> {
        let data = ListingsData::new(listings.to_vec());
        self.write_json(LISTINGS_KEY, &data).await?;
        log::info!("Saved {} listings", data.count);
        Ok(())
    }

    async fn insert_listing(&self, listing: Listing) -> Result<()> {
        let mut listings = self.load_listings().await?;
        if listings.iter().any(|l| l.id == listing.id) {
            return Err(AppError::validation(format!(
                "listing {} already exists",
                listing.id
            )));
        }
        listings.push(listing);
        self.save_listings(&listings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_listing;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!storage.path("test.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_store_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_listings().await.unwrap().is_empty());
        assert!(storage.find_listing("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested"));

        let listings = vec![
            test_listing("a", "Desk", "Furniture"),
            test_listing("b", "Tent", ""),
        ];
        storage.save_listings(&listings).await.unwrap();

        let loaded = storage.load_listings().await.unwrap();
        assert_eq!(loaded, listings);

        let raw: serde_json::Value = storage.read_json(LISTINGS_KEY).await.unwrap().unwrap();
        assert_eq!(raw["count"], 2);
        assert!(raw["listings"][0].get("createdAt").is_some());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.insert_listing(test_listing("a", "Desk", "")).await.unwrap();
        let err = storage
            .insert_listing(test_listing("a", "Chair", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let found = storage.find_listing("a").await.unwrap().unwrap();
        assert_eq!(found.title, "Desk");
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.write_bytes(LISTINGS_KEY, b"{not json").await.unwrap();

        assert!(matches!(
            storage.load_listings().await,
            Err(AppError::Json(_))
        ));
    }
}
