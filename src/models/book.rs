//! Catalog record structures.

use serde::{Deserialize, Serialize};

/// Word list used by the listing's `star-rating` class tokens, indexed by score.
pub const RATING_WORDS: [&str; 6] = ["Zero", "One", "Two", "Three", "Four", "Five"];

/// Highest rating a book can carry.
pub const MAX_RATING: u8 = 5;

/// One book as persisted in the source file.
///
/// Field order is the column order of the CSV header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookEntry {
    /// Book title; an empty cell loads as `None`
    pub title: Option<String>,

    /// Price in the site's currency, non-negative
    pub price: f64,

    /// Star rating from 0 to 5
    pub rating: u8,

    /// Stock status text (e.g. "In stock")
    pub availability: String,

    /// Category the book was listed under; an empty cell loads as `None`
    pub category: Option<String>,

    /// Absolute URL of the cover image
    pub image_url: String,
}

impl BookEntry {
    /// Check the value ranges the source file promises.
    pub fn check(&self) -> std::result::Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("price must be a non-negative number, got {}", self.price));
        }
        if self.rating > MAX_RATING {
            return Err(format!("rating must be 0-{MAX_RATING}, got {}", self.rating));
        }
        Ok(())
    }
}

/// A book as served by the query engine.
///
/// `id` is the 1-based row position in the file at load time and is not
/// persisted; re-scraping reassigns it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogRecord {
    pub id: usize,

    #[serde(flatten)]
    pub entry: BookEntry,
}

impl CatalogRecord {
    pub fn new(id: usize, entry: BookEntry) -> Self {
        Self { id, entry }
    }

    pub fn title(&self) -> Option<&str> {
        self.entry.title.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.entry.category.as_deref()
    }
}
