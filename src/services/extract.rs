//! Listing page extraction.
//!
//! Everything that knows about the upstream HTML layout lives here, driven by
//! [`SiteSelectors`]. The rest of the scraper only sees categories, books and
//! next-page URLs.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{BookEntry, Category, RATING_WORDS, SiteSelectors};
use crate::utils::{resolve_url, site_url};

/// Compiled selectors plus the site base used to absolutize links.
#[derive(Debug)]
pub struct ListingExtractor {
    base_url: Url,
    price_noise: Regex,
    category_link: Selector,
    item: Selector,
    title: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
    image: Selector,
    next_page: Selector,
}

impl ListingExtractor {
    /// Compile `selectors` for the site rooted at `base_url`.
    pub fn new(base_url: &str, selectors: &SiteSelectors) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            price_noise: Regex::new(r"[^0-9.]")
                .map_err(|e| AppError::config(format!("price pattern: {e}")))?,
            category_link: parse_selector(&selectors.category_link)?,
            item: parse_selector(&selectors.item)?,
            title: parse_selector(&selectors.title)?,
            price: parse_selector(&selectors.price)?,
            rating: parse_selector(&selectors.rating)?,
            availability: parse_selector(&selectors.availability)?,
            image: parse_selector(&selectors.image)?,
            next_page: parse_selector(&selectors.next_page)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Categories listed in the root page navigation, in page order.
    ///
    /// A name appearing twice keeps its first position and its last link.
    pub fn categories(&self, document: &Html) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for link in document.select(&self.category_link) {
            let name = collapse_whitespace(&link.text().collect::<String>());
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let url = resolve_url(&self.base_url, href);
            match categories.iter_mut().find(|c| c.name == name) {
                Some(existing) => existing.url = url,
                None => categories.push(Category { name, url }),
            }
        }
        categories
    }

    /// Item blocks on a listing page, in page order.
    pub fn items<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.item)
    }

    /// Absolute URL of the next listing page, if the page links one.
    ///
    /// Resolved against the current page so both `index.html` and
    /// `page-N.html` style pages chain correctly.
    pub fn next_page(&self, document: &Html, page_url: &Url) -> Option<String> {
        document
            .select(&self.next_page)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href))
    }

    /// Extract one book from an item block.
    ///
    /// A blank title attribute yields `None`, matching how an empty cell
    /// loads back from the catalog file.
    pub fn extract_item(&self, item: &ElementRef<'_>, category: &str) -> Result<BookEntry> {
        let title = self
            .first(item, &self.title, "title")?
            .value()
            .attr("title")
            .ok_or_else(|| AppError::extract("title", "anchor has no title attribute"))?;
        let title = (!title.trim().is_empty()).then(|| title.to_string());

        let price_text: String = self.first(item, &self.price, "price")?.text().collect();
        let price = self.parse_price(&price_text)?;

        let rating = parse_rating(self.first(item, &self.rating, "rating")?.value().classes());

        let availability = self
            .first(item, &self.availability, "availability")?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        let src = self
            .first(item, &self.image, "image")?
            .value()
            .attr("src")
            .ok_or_else(|| AppError::extract("image", "img has no src attribute"))?;
        let image_url = site_url(self.base_url.as_str(), src);

        Ok(BookEntry {
            title,
            price,
            rating,
            availability,
            category: Some(category.to_string()),
            image_url,
        })
    }

    /// Parse a displayed price, ignoring currency symbols and mis-decoded bytes.
    pub fn parse_price(&self, text: &str) -> Result<f64> {
        let cleaned = self.price_noise.replace_all(text, "");
        cleaned
            .parse::<f64>()
            .map_err(|e| AppError::extract("price", format!("'{}': {}", text.trim(), e)))
    }

    fn first<'a>(
        &self,
        item: &ElementRef<'a>,
        selector: &Selector,
        field: &str,
    ) -> Result<ElementRef<'a>> {
        item.select(selector)
            .next()
            .ok_or_else(|| AppError::extract(field, "element not found"))
    }
}

/// Map class tokens to a star rating; 0 when no rating word is present.
pub fn parse_rating<'a>(tokens: impl IntoIterator<Item = &'a str>) -> u8 {
    let tokens: Vec<&str> = tokens.into_iter().collect();
    RATING_WORDS
        .iter()
        .position(|word| tokens.contains(word))
        .map_or(0, |score| score as u8)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
