// src/services/books.rs

//! Book scraper service.
//!
//! Walks the category navigation, then every listing page of each category
//! in order, collecting books through a [`ListingExtractor`].

use std::collections::HashSet;
use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{BookEntry, Category, ItemErrorPolicy, ScrapeOutcome, ScraperConfig};
use crate::services::ListingExtractor;
use crate::utils::http::PageFetcher;

/// Books collected from all pages of one category.
#[derive(Debug, Default)]
pub struct CategoryScrape {
    pub books: Vec<BookEntry>,
    pub pages: usize,
    pub skipped: usize,
}

/// Everything taken from a single listing page.
struct ListingPage {
    books: Vec<BookEntry>,
    skipped: usize,
    next: Option<String>,
}

/// Service for scraping the book listing site.
pub struct BookScraper<'a> {
    fetcher: &'a dyn PageFetcher,
    extractor: ListingExtractor,
    page_delay: Duration,
    on_item_error: ItemErrorPolicy,
}

impl<'a> BookScraper<'a> {
    /// Create a scraper fetching through `fetcher` with the given settings.
    pub fn new(fetcher: &'a dyn PageFetcher, config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: ListingExtractor::new(&config.base_url, &config.selectors)?,
            page_delay: Duration::from_millis(config.page_delay_ms),
            on_item_error: config.on_item_error,
        })
    }

    /// Scrape every category, in discovery order.
    pub async fn scrape_all(&self) -> Result<ScrapeOutcome> {
        let categories = self.discover_categories().await?;
        log::info!("Discovered {} categories", categories.len());

        let mut outcome = ScrapeOutcome {
            category_count: categories.len(),
            ..ScrapeOutcome::default()
        };

        for (idx, category) in categories.iter().enumerate() {
            log::info!(
                "[{}/{}] Scraping category: {}",
                idx + 1,
                categories.len(),
                category.name
            );
            let scraped = self.scrape_category(category).await?;
            log::info!(
                "    {} books across {} pages",
                scraped.books.len(),
                scraped.pages
            );

            outcome.page_count += scraped.pages;
            outcome.skipped_items += scraped.skipped;
            outcome.books.extend(scraped.books);
        }

        Ok(outcome)
    }

    /// Read the category navigation from the site root.
    ///
    /// Fails if the root cannot be fetched or lists no categories.
    pub async fn discover_categories(&self) -> Result<Vec<Category>> {
        let root = self.extractor.base_url().to_string();
        let html = self.fetcher.fetch(&root).await?;
        let categories = self.extractor.categories(&Html::parse_document(&html));

        if categories.is_empty() {
            return Err(AppError::discovery(format!(
                "no categories found at {root}; has the site layout changed?"
            )));
        }
        Ok(categories)
    }

    /// Follow a category's listing pages until there is no next link.
    ///
    /// The politeness delay separates consecutive pages; the first page is
    /// fetched immediately.
    pub async fn scrape_category(&self, category: &Category) -> Result<CategoryScrape> {
        let mut result = CategoryScrape::default();
        let mut visited = HashSet::new();
        let mut page_url = category.url.clone();

        loop {
            if !visited.insert(page_url.clone()) {
                return Err(AppError::crawl(
                    &category.name,
                    format!("pagination loops back to {page_url}"),
                ));
            }

            if result.pages > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let html = self.fetcher.fetch(&page_url).await?;
            result.pages += 1;

            let page = self.parse_listing(&html, &page_url, &category.name)?;
            log::debug!(
                "{}: {} books on {}",
                category.name,
                page.books.len(),
                page_url
            );
            result.books.extend(page.books);
            result.skipped += page.skipped;

            match page.next {
                Some(next) => page_url = next,
                None => break,
            }
        }

        Ok(result)
    }

    /// Extract books and the next link from one page.
    ///
    /// Kept synchronous so the parsed document never lives across an await.
    fn parse_listing(&self, html: &str, page_url: &str, category: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let url = Url::parse(page_url)?;

        let mut books = Vec::new();
        let mut skipped = 0;
        for (position, item) in self.extractor.items(&document).enumerate() {
            match self.extractor.extract_item(&item, category) {
                Ok(book) => books.push(book),
                Err(e) => match self.on_item_error {
                    ItemErrorPolicy::Abort => {
                        return Err(AppError::crawl(
                            page_url,
                            format!("item {}: {}", position + 1, e),
                        ));
                    }
                    ItemErrorPolicy::Skip => {
                        log::warn!("Skipping item {} on {}: {}", position + 1, page_url, e);
                        skipped += 1;
                    }
                },
            }
        }

        Ok(ListingPage {
            books,
            skipped,
            next: self.extractor.next_page(&document, &url),
        })
    }
}
