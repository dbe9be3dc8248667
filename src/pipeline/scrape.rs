// src/pipeline/scrape.rs

//! Scraping pipeline: site → catalog file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::services::BookScraper;
use crate::storage::CsvCatalog;
use crate::utils::http::PageFetcher;

/// Statistics of a completed scraper run.
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub book_count: usize,
    pub category_count: usize,
    pub page_count: usize,
    pub skipped_items: usize,
    pub output: PathBuf,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ScrapeSummary {
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Scrape the whole site and replace the catalog file.
///
/// The file is only touched after every category has been scraped; any
/// failure before that leaves the previous catalog in place.
pub async fn run_scraper(
    config: &Config,
    fetcher: &dyn PageFetcher,
    catalog: &CsvCatalog,
) -> Result<ScrapeSummary> {
    let start_time = Utc::now();
    log::info!("Scraping {}", config.scraper.base_url);

    let scraper = BookScraper::new(fetcher, &config.scraper)?;
    let outcome = scraper.scrape_all().await?;

    let written = catalog.save(&outcome.books).await?;
    let end_time = Utc::now();

    let summary = ScrapeSummary {
        book_count: written,
        category_count: outcome.category_count,
        page_count: outcome.page_count,
        skipped_items: outcome.skipped_items,
        output: catalog.path().to_path_buf(),
        start_time,
        end_time,
    };

    log::info!(
        "Saved {} books from {} categories ({} pages) to {} in {}s",
        summary.book_count,
        summary.category_count,
        summary.page_count,
        summary.output.display(),
        summary.elapsed_secs()
    );
    if summary.skipped_items > 0 {
        log::warn!("{} items could not be extracted and were skipped", summary.skipped_items);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{
        BASE, FixtureFetcher, fast_config, item_html, listing_page, root_page,
    };
    use crate::storage::RecordSource;
    use tempfile::TempDir;

    const POETRY: &str = "https://books.toscrape.com/catalogue/category/books/poetry_23/index.html";

    fn config() -> Config {
        Config {
            scraper: fast_config(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_run_scraper_writes_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = CsvCatalog::new(tmp.path().join("books.csv"));
        let fetcher = FixtureFetcher::default()
            .with_page(
                BASE,
                root_page(&[("Poetry", "catalogue/category/books/poetry_23/index.html")]),
            )
            .with_page(
                POETRY,
                listing_page(
                    &[
                        item_html("A Light in the Attic", "Â£51.77", "Three"),
                        item_html("Olio", "Â£23.88", "One"),
                    ],
                    None,
                ),
            );

        let summary = run_scraper(&config(), &fetcher, &catalog).await.unwrap();
        assert_eq!(summary.book_count, 2);
        assert_eq!(summary.category_count, 1);

        let records = catalog.load().await.unwrap();
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].title(), Some("A Light in the Attic"));
        assert_eq!(records[0].entry.price, 51.77);
        assert_eq!(records[0].entry.rating, 3);
        assert_eq!(records[1].category(), Some("Poetry"));
        assert_eq!(
            records[1].entry.image_url,
            "https://books.toscrape.com/media/cache/One.jpg"
        );
    }

    #[tokio::test]
    async fn test_failed_run_keeps_previous_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = CsvCatalog::new(tmp.path().join("books.csv"));
        std::fs::write(
            catalog.path(),
            "title,price,rating,availability,category,image_url\n\
             Kept,1.0,1,In stock,Travel,https://x/1.jpg\n",
        )
        .unwrap();

        // Category page is missing, so the run fails after discovery.
        let fetcher = FixtureFetcher::default().with_page(
            BASE,
            root_page(&[("Poetry", "catalogue/category/books/poetry_23/index.html")]),
        );

        assert!(run_scraper(&config(), &fetcher, &catalog).await.is_err());
        let records = catalog.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("Kept"));
    }
}
