// src/models/selectors.rs

//! CSS selectors describing the upstream site's listing structure.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping the book listing site.
///
/// These are the whole contract with the upstream HTML; a layout change on
/// the site should only require editing this table in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSelectors {
    /// Links in the category navigation on the site root
    #[serde(default = "defaults::category_link")]
    pub category_link: String,

    /// Each item block on a listing page
    #[serde(default = "defaults::item")]
    pub item: String,

    /// Anchor carrying the book title in its `title` attribute
    #[serde(default = "defaults::title")]
    pub title: String,

    /// Element holding the displayed price
    #[serde(default = "defaults::price")]
    pub price: String,

    /// Element whose class tokens encode the star rating
    #[serde(default = "defaults::rating")]
    pub rating: String,

    /// Element holding the stock status text
    #[serde(default = "defaults::availability")]
    pub availability: String,

    /// Cover image element (read via `src`)
    #[serde(default = "defaults::image")]
    pub image: String,

    /// "Next page" anchor on a listing page
    #[serde(default = "defaults::next_page")]
    pub next_page: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            category_link: defaults::category_link(),
            item: defaults::item(),
            title: defaults::title(),
            price: defaults::price(),
            rating: defaults::rating(),
            availability: defaults::availability(),
            image: defaults::image(),
            next_page: defaults::next_page(),
        }
    }
}

impl SiteSelectors {
    /// All selectors with their config key, for validation and error messages.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("category_link", &self.category_link),
            ("item", &self.item),
            ("title", &self.title),
            ("price", &self.price),
            ("rating", &self.rating),
            ("availability", &self.availability),
            ("image", &self.image),
            ("next_page", &self.next_page),
        ]
    }
}

mod defaults {
    pub fn category_link() -> String {
        "div.side_categories ul li ul li a".into()
    }
    pub fn item() -> String {
        "article.product_pod".into()
    }
    pub fn title() -> String {
        "h3 a".into()
    }
    pub fn price() -> String {
        "p.price_color".into()
    }
    pub fn rating() -> String {
        "p.star-rating".into()
    }
    pub fn availability() -> String {
        "p.instock.availability".into()
    }
    pub fn image() -> String {
        "img".into()
    }
    pub fn next_page() -> String {
        "li.next > a".into()
    }
}
