//! CSV flat-file storage implementation.
//!
//! Reads are plain full-file loads. Writes go to a sibling `.tmp` file which
//! is synced and renamed over the source, so a concurrent reader sees either
//! the previous catalog or the new one, never a partial file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{BookEntry, CatalogRecord};
use crate::storage::RecordSource;

/// Column names of the source file, in order.
pub const HEADER: [&str; 6] = [
    "title",
    "price",
    "rating",
    "availability",
    "category",
    "image_url",
];

/// Catalog backed by a CSV file on the local filesystem.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    /// Create a catalog reading from and writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries in file order, without ids.
    pub async fn read_entries(&self) -> Result<Vec<BookEntry>> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_entries(&bytes)
    }

    /// Replace the whole file with `entries`, header included.
    ///
    /// Returns the number of rows written.
    pub async fn save(&self, entries: &[BookEntry]) -> Result<usize> {
        let bytes = encode_entries(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        if let Err(e) = write_synced(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("Replaced {} with {} rows", self.path.display(), entries.len());
        Ok(entries.len())
    }
}

#[async_trait]
impl RecordSource for CsvCatalog {
    async fn load(&self) -> Result<Vec<CatalogRecord>> {
        let records = self
            .read_entries()
            .await?
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| CatalogRecord::new(idx + 1, entry))
            .collect();
        Ok(records)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse CSV bytes into validated entries.
fn parse_entries(bytes: &[u8]) -> Result<Vec<BookEntry>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let mut entries = Vec::new();
    for (idx, row) in reader.deserialize::<BookEntry>().enumerate() {
        let entry = row?;
        // Row 1 is the header.
        entry
            .check()
            .map_err(|msg| AppError::validation(format!("row {}: {}", idx + 2, msg)))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn encode_entries(entries: &[BookEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written by hand so an empty catalog still carries its header.
    writer.write_record(HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.into_inner().map_err(|e| AppError::Io(e.into_error()))
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(title: &str, category: &str) -> BookEntry {
        BookEntry {
            title: Some(title.to_string()),
            price: 10.5,
            rating: 2,
            availability: "In stock".to_string(),
            category: Some(category.to_string()),
            image_url: "https://books.toscrape.com/media/x.jpg".to_string(),
        }
    }
    #[tokio::test]
    async fn test_load_assigns_sequential_ids() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        fs::write(
            &path,
            "title,price,rating,availability,category,image_url\n\
             First,1.5,1,In stock,Travel,https://x/1.jpg\n\
             Second,2.0,2,In stock,Poetry,https://x/2.jpg\n",
        )
        .unwrap();

        let records = CsvCatalog::new(&path).load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].title(), Some("Second"));
        assert_eq!(records[0].entry.price, 1.5);
    }

    #[tokio::test]
    async fn test_quoted_fields_and_empty_cells() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        fs::write(
            &path,
            "title,price,rating,availability,category,image_url\n\
             \"Sapiens: A Brief History, Vol. 1\",54.23,5,In stock,,https://x/s.jpg\n",
        )
        .unwrap();

        let records = CsvCatalog::new(&path).load().await.unwrap();
        assert_eq!(records[0].title(), Some("Sapiens: A Brief History, Vol. 1"));
        assert_eq!(records[0].category(), None);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let result = CsvCatalog::new(tmp.path().join("nope.csv")).load().await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_unparsable_row_fails_whole_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        fs::write(
            &path,
            "title,price,rating,availability,category,image_url\n\
             Good,1.0,1,In stock,Travel,https://x/1.jpg\n\
             Bad,not-a-price,1,In stock,Travel,https://x/2.jpg\n",
        )
        .unwrap();

        assert!(matches!(
            CsvCatalog::new(&path).load().await,
            Err(AppError::Csv(_))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        fs::write(
            &path,
            "title,price,rating,availability,category,image_url\n\
             Odd,1.0,9,In stock,Travel,https://x/1.jpg\n",
        )
        .unwrap();

        assert!(matches!(
            CsvCatalog::new(&path).load().await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_column_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        fs::write(&path, "title,price\nOnly,1.0\n").unwrap();

        assert!(CsvCatalog::new(&path).load().await.is_err());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let catalog = CsvCatalog::new(tmp.path().join("data").join("books.csv"));
        let entries = vec![entry("One, Two", "Travel"), entry("Three \"quoted\"", "Poetry")];

        assert_eq!(catalog.save(&entries).await.unwrap(), 2);
        assert_eq!(catalog.read_entries().await.unwrap(), entries);
        assert!(!catalog.path().with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_save_empty_writes_header() {
        let tmp = TempDir::new().unwrap();
        let catalog = CsvCatalog::new(tmp.path().join("books.csv"));

        catalog.save(&[]).await.unwrap();
        let content = fs::read_to_string(catalog.path()).unwrap();
        assert_eq!(content.trim_end(), HEADER.join(","));
        assert!(catalog.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = CsvCatalog::new(tmp.path().join("books.csv"));

        catalog
            .save(&[entry("Old", "Travel"), entry("Older", "Travel")])
            .await
            .unwrap();
        catalog.save(&[entry("New", "Poetry")]).await.unwrap();

        let records = catalog.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("New"));
    }
}
