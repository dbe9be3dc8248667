// src/models/mod.rs

//! Domain models for the catalog application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod book;
mod config;
mod selectors;

// Re-export all public types
pub use book::{BookEntry, CatalogRecord, MAX_RATING, RATING_WORDS};
pub use config::{Config, ItemErrorPolicy, ScraperConfig, ServerConfig, StorageConfig};
pub use selectors::SiteSelectors;

/// A category discovered in the site navigation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Category {
    pub name: String,
    /// Absolute URL of the category's first listing page
    pub url: String,
}

/// Outcome of one scraper run, before it is written out.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Every extracted book, in category then page then item order
    pub books: Vec<BookEntry>,
    pub category_count: usize,
    pub page_count: usize,
    /// Entries dropped under the skip policy
    pub skipped_items: usize,
}
