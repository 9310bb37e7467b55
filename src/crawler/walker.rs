//! Pagination traversal for one category
//!
//! The walker drives a category's listing pages through an explicit state
//! machine: `Fetching -> Extracting -> Advancing -> Done`. Every transition
//! either makes forward progress or terminates, so a category can never
//! loop or silently drop a page.

use crate::crawler::fetcher::{fetch_page, PageStatus};
use crate::crawler::throttle::Throttle;
use crate::url::UrlResolver;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of walking one category's listing pages
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Absolute item URLs in listing order across all pages
    pub item_urls: Vec<String>,

    /// Number of listing pages actually fetched
    pub pages_fetched: u32,

    /// Why the walk ended before pagination was exhausted, if it did
    pub stopped_early: Option<String>,
}

/// Per-category traversal state
///
/// Owned exclusively by one `walk` invocation and discarded when it ends.
enum WalkerState {
    Fetching(String),
    Extracting { page_url: String, body: String },
    Advancing { page_url: String, next_href: Option<String> },
    Done,
}

/// Walks a category's listing pages and collects item links
pub struct PaginationWalker<'a> {
    client: &'a Client,
    resolver: &'a UrlResolver,
    max_pages: Option<u32>,
}

impl<'a> PaginationWalker<'a> {
    /// Creates a walker
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to fetch listing pages with
    /// * `resolver` - Resolver for item and next-page links
    /// * `max_pages` - Cap on listing pages per category; `None` means
    ///   walk until the site stops offering a next link
    pub fn new(client: &'a Client, resolver: &'a UrlResolver, max_pages: Option<u32>) -> Self {
        Self {
            client,
            resolver,
            max_pages,
        }
    }

    /// Traverses listing pages starting at `start_url`
    ///
    /// A fetch failure stops the category (no retry) but keeps the item
    /// URLs already collected. The `stop` flag is honored between pages so
    /// an interrupt never abandons a fetch midway.
    pub async fn walk(
        &self,
        start_url: &str,
        throttle: &mut Throttle,
        stop: &AtomicBool,
    ) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_items: HashSet<String> = HashSet::new();
        let mut state = WalkerState::Fetching(start_url.to_string());

        loop {
            state = match state {
                WalkerState::Fetching(page_url) => {
                    visited.insert(page_url.clone());
                    throttle.wait().await;
                    let result = fetch_page(self.client, &page_url).await;
                    outcome.pages_fetched += 1;

                    match result.status {
                        PageStatus::Ok(body) => WalkerState::Extracting { page_url, body },
                        status => {
                            // Zero items for this page; stop the category.
                            tracing::warn!(
                                "Listing page {} failed ({}), stopping category",
                                page_url,
                                status.describe()
                            );
                            outcome.stopped_early = Some(status.describe());
                            WalkerState::Done
                        }
                    }
                }

                WalkerState::Extracting { page_url, body } => {
                    let listing = parse_listing(&body, self.resolver);
                    tracing::info!(
                        "Page {}: {} items",
                        outcome.pages_fetched,
                        listing.item_urls.len()
                    );
                    for item_url in listing.item_urls {
                        if seen_items.insert(item_url.clone()) {
                            outcome.item_urls.push(item_url);
                        }
                    }
                    WalkerState::Advancing {
                        page_url,
                        next_href: listing.next_href,
                    }
                }

                WalkerState::Advancing { page_url, next_href } => match next_href {
                    Some(href) if !self.cap_reached(outcome.pages_fetched) => {
                        if stop.load(Ordering::Relaxed) {
                            outcome.stopped_early = Some("interrupted".to_string());
                            WalkerState::Done
                        } else {
                            let next_url = self.resolver.resolve_next_page(&page_url, &href);
                            if visited.contains(&next_url) {
                                tracing::warn!(
                                    "Next link on {} points back to {}, stopping category",
                                    page_url,
                                    next_url
                                );
                                outcome.stopped_early = Some("pagination loop".to_string());
                                WalkerState::Done
                            } else {
                                WalkerState::Fetching(next_url)
                            }
                        }
                    }
                    Some(_) => {
                        tracing::info!("Page cap reached after {} pages", outcome.pages_fetched);
                        WalkerState::Done
                    }
                    None => WalkerState::Done,
                },

                WalkerState::Done => break,
            };
        }

        outcome
    }

    fn cap_reached(&self, pages_fetched: u32) -> bool {
        self.max_pages
            .map(|cap| pages_fetched >= cap)
            .unwrap_or(false)
    }
}

/// Item links and the optional next-page href from one listing document
pub(crate) struct Listing {
    pub item_urls: Vec<String>,
    pub next_href: Option<String>,
}

/// Parses a listing document for item links and the next-page link
///
/// Item anchors sit inside each product container's heading; containers
/// without a usable anchor are skipped rather than failing the page.
pub(crate) fn parse_listing(html: &str, resolver: &UrlResolver) -> Listing {
    let document = Html::parse_document(html);
    let mut item_urls = Vec::new();

    if let Ok(selector) = Selector::parse("article.product_pod h3 a") {
        for anchor in document.select(&selector) {
            if let Some(href) = anchor.value().attr("href") {
                item_urls.push(resolver.resolve_item(href));
            }
        }
    }

    let mut next_href = None;
    if let Ok(selector) = Selector::parse("li.next a") {
        next_href = document
            .select(&selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.to_string());
    }

    Listing {
        item_urls,
        next_href,
    }
}
