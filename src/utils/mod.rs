//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Drop leading `../` and `./` segments from a relative path.
pub fn strip_parent_segments(path: &str) -> &str {
    let mut rest = path;
    loop {
        if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else {
            return rest;
        }
    }
}

/// Join a site-root-relative path onto the site base URL.
///
/// Unlike [`resolve_url`], this ignores where the path was found: listing
/// pages reference assets with `../` chains relative to their own depth.
pub fn site_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let path = strip_parent_segments(path).trim_start_matches('/');
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_next_page_from_index_and_numbered_pages() {
        let first = "https://books.toscrape.com/catalogue/category/books/mystery_3/index.html";
        let second = "https://books.toscrape.com/catalogue/category/books/mystery_3/page-2.html";
        assert_eq!(resolve_url(&Url::parse(first).unwrap(), "page-2.html"), second);
        assert_eq!(
            resolve_url(&Url::parse(second).unwrap(), "page-3.html"),
            "https://books.toscrape.com/catalogue/category/books/mystery_3/page-3.html"
        );
    }

    #[test]
    fn test_strip_parent_segments() {
        assert_eq!(
            strip_parent_segments("../../../../media/cache/fe/72/fe72.jpg"),
            "media/cache/fe/72/fe72.jpg"
        );
        assert_eq!(strip_parent_segments("./media/a.jpg"), "media/a.jpg");
        assert_eq!(strip_parent_segments("media/a.jpg"), "media/a.jpg");
    }

    #[test]
    fn test_site_url() {
        assert_eq!(
            site_url("https://books.toscrape.com/", "../../media/cache/a.jpg"),
            "https://books.toscrape.com/media/cache/a.jpg"
        );
        assert_eq!(
            site_url("https://books.toscrape.com", "media/a.jpg"),
            "https://books.toscrape.com/media/a.jpg"
        );
        assert_eq!(
            site_url("https://books.toscrape.com/", "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
