//! Storage abstractions for the book catalog.
//!
//! The catalog lives in a single flat file that the scraper overwrites
//! wholesale and the query engine re-reads on every request:
//!
//! ```text
//! data/
//! ├── config.toml     # Scraper / server configuration
//! └── books.csv       # title,price,rating,availability,category,image_url
//! ```

pub mod flat_file;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CatalogRecord;

// Re-export for convenience
pub use flat_file::{CsvCatalog, HEADER};

/// A loader producing the full ordered catalog.
///
/// Query operations take this as a parameter instead of reaching for shared
/// state, so each call sees whatever the source holds at that moment.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every record, assigning ids by 1-based position.
    async fn load(&self) -> Result<Vec<CatalogRecord>>;

    /// Human-readable location of the source, for logs and diagnostics.
    fn location(&self) -> String;
}
