//! Category discovery from the site's home page
//!
//! The home page carries a navigation list of every category. The first
//! entry links back to the full catalog rather than a real category, so it
//! is skipped.

use crate::config::SiteConfig;
use crate::crawler::fetcher::{fetch_page, PageStatus};
use crate::records::Category;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;

/// Fetches the home page and enumerates the site's categories
///
/// Fails soft: if the home page cannot be fetched, the failure is logged and
/// an empty sequence is returned so the caller can decide how to proceed.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `site` - Site layout configuration
///
/// # Returns
///
/// Categories in navigation order, possibly empty.
pub async fn discover(client: &Client, site: &SiteConfig) -> Vec<Category> {
    let result = fetch_page(client, &site.base_url).await;

    match result.status {
        PageStatus::Ok(body) => {
            let categories = parse_categories(&body, &site.base_url);
            tracing::info!("Discovered {} categories", categories.len());
            categories
        }
        status => {
            tracing::error!(
                "Category discovery failed for {}: {}",
                site.base_url,
                status.describe()
            );
            Vec::new()
        }
    }
}

/// Parses the home page navigation list into categories
///
/// The first anchor is the "all items" link and is excluded. Slugs are
/// unique per run: a repeated name gets a numeric suffix.
pub(crate) fn parse_categories(html: &str, base_url: &str) -> Vec<Category> {
    let document = Html::parse_document(html);
    let mut categories = Vec::new();
    let mut slug_counts: HashMap<String, u32> = HashMap::new();

    if let Ok(selector) = Selector::parse(".nav-list a") {
        for link in document.select(&selector).skip(1) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let name = link.text().collect::<String>().trim().to_string();
            if name.is_empty() {
                continue;
            }

            let url = format!("{}{}", base_url, href.trim_start_matches('/'));
            let mut category = Category::new(name, url);

            let count = slug_counts.entry(category.slug.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                category.slug = format!("{}_{}", category.slug, count);
            }

            tracing::debug!("  {} -> {}", category.name, category.url);
            categories.push(category);
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_page(entries: &[(&str, &str)]) -> String {
        let links: String = entries
            .iter()
            .map(|(href, name)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
            .collect();
        format!(
            r#"<html><body><div class="side_categories">
            <ul class="nav nav-list">{}</ul>
            </div></body></html>"#,
            links
        )
    }

    #[test]
    fn test_first_entry_is_excluded() {
        let html = nav_page(&[
            ("index.html", "All items"),
            ("catalogue/category/travel_2/index.html", "Travel"),
            ("catalogue/category/mystery_3/index.html", "Mystery"),
        ]);
        let categories = parse_categories(&html, "http://example.com/");

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Travel");
        assert_eq!(categories[1].name, "Mystery");
    }

    #[test]
    fn test_urls_are_absolute() {
        let html = nav_page(&[
            ("index.html", "All items"),
            ("catalogue/category/travel_2/index.html", "Travel"),
        ]);
        let categories = parse_categories(&html, "http://example.com/");

        assert_eq!(
            categories[0].url,
            "http://example.com/catalogue/category/travel_2/index.html"
        );
    }

    #[test]
    fn test_names_are_trimmed() {
        let html = nav_page(&[
            ("index.html", "All items"),
            ("catalogue/category/poetry_23/index.html", "\n  Poetry\n  "),
        ]);
        let categories = parse_categories(&html, "http://example.com/");

        assert_eq!(categories[0].name, "Poetry");
        assert_eq!(categories[0].slug, "poetry");
    }

    #[test]
    fn test_duplicate_names_get_unique_slugs() {
        let html = nav_page(&[
            ("index.html", "All items"),
            ("catalogue/category/travel_2/index.html", "Travel"),
            ("catalogue/category/travel_99/index.html", "Travel"),
        ]);
        let categories = parse_categories(&html, "http://example.com/");

        assert_eq!(categories[0].slug, "travel");
        assert_eq!(categories[1].slug, "travel_2");
    }

    #[test]
    fn test_no_nav_list_yields_empty() {
        let categories =
            parse_categories("<html><body><p>nothing here</p></body></html>", "http://example.com/");
        assert!(categories.is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<html><body><ul class="nav nav-list">
            <li><a href="index.html">All items</a></li>
            <li><a>Broken</a></li>
            <li><a href="catalogue/category/art_25/index.html">Art</a></li>
            </ul></body></html>"#;
        let categories = parse_categories(html, "http://example.com/");

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Art");
    }

    #[test]
    fn test_leading_slash_href_does_not_double_slash() {
        let html = nav_page(&[
            ("index.html", "All items"),
            ("/catalogue/category/travel_2/index.html", "Travel"),
        ]);
        let categories = parse_categories(&html, "http://example.com/");

        assert_eq!(
            categories[0].url,
            "http://example.com/catalogue/category/travel_2/index.html"
        );
    }
}
