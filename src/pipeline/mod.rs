//! Pipeline entry points for catalog operations.
//!
//! - `run_scraper`: Scrape the book site and replace the catalog file
//! - `run_validate`: Check configuration before a run

pub mod scrape;
pub mod validate;

pub use scrape::{ScrapeSummary, run_scraper};
pub use validate::run_validate;
