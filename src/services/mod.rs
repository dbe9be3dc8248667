//! Service layer for the catalog application.
//!
//! This module contains the business logic for:
//! - Listing page extraction (`ListingExtractor`)
//! - Site scraping (`BookScraper`)
//! - Catalog queries (`query`)

mod books;
mod extract;
pub mod query;

pub use books::{BookScraper, CategoryScrape};
pub use extract::{ListingExtractor, parse_rating};

#[cfg(test)]
pub(crate) use books::tests as fixtures;
