//! Crawl orchestration
//!
//! The coordinator composes discovery, pagination, fetching, extraction and
//! persistence per category and across categories. Failures are contained
//! at the smallest possible unit (field < record < page < category); only
//! an interrupt stops the run early, and then only between fetches.

use crate::config::Config;
use crate::crawler::discovery::discover;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_page, PageStatus};
use crate::crawler::throttle::Throttle;
use crate::crawler::walker::PaginationWalker;
use crate::output::csv_output::write_records;
use crate::output::images::download_image;
use crate::output::summary::RunSummary;
use crate::records::{Category, Record};
use crate::url::UrlResolver;
use crate::ScrapeError;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Which categories a run should cover
#[derive(Debug, Clone)]
pub enum CategorySelection {
    /// Every discovered category
    All,

    /// Only the named categories, matched case-insensitively
    Named(Vec<String>),
}

/// Main crawl coordinator
pub struct Coordinator {
    config: Config,
    client: Client,
    resolver: UrlResolver,
    shutdown: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a coordinator from validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `shutdown` - Flag set by the interrupt handler; checked between
    ///   fetches so the run stops at a safe point
    pub fn new(config: Config, shutdown: Arc<AtomicBool>) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.http)?;
        let resolver = UrlResolver::new(&config.site.base_url, &config.site.catalogue_root);

        Ok(Self {
            config,
            client,
            resolver,
            shutdown,
        })
    }

    /// Runs discovery against the configured site
    pub async fn discover_categories(&self) -> Vec<Category> {
        discover(&self.client, &self.config.site).await
    }

    /// Resolves a selection against the discovered categories
    ///
    /// Named selections preserve the requested order; names that match
    /// nothing are returned separately so the caller can report them.
    pub fn select_categories(
        available: &[Category],
        selection: &CategorySelection,
    ) -> (Vec<Category>, Vec<String>) {
        match selection {
            CategorySelection::All => (available.to_vec(), Vec::new()),
            CategorySelection::Named(names) => {
                let mut selected = Vec::new();
                let mut unknown = Vec::new();
                for name in names {
                    match available
                        .iter()
                        .find(|category| category.name.eq_ignore_ascii_case(name))
                    {
                        Some(category) => selected.push(category.clone()),
                        None => unknown.push(name.clone()),
                    }
                }
                (selected, unknown)
            }
        }
    }

    /// Runs a full crawl for the selected categories
    ///
    /// # Arguments
    ///
    /// * `selection` - Which categories to crawl
    /// * `download_images` - Whether to fetch each record's cover image
    /// * `combined_output` - Optional extra CSV receiving all records
    ///
    /// # Returns
    ///
    /// The run summary. Per-category persistence failures are reported and
    /// contained; the summary is produced even for an interrupted run.
    pub async fn run(
        &self,
        selection: &CategorySelection,
        download_images: bool,
        combined_output: Option<&Path>,
    ) -> Result<RunSummary, ScrapeError> {
        let mut summary = RunSummary::default();

        let available = self.discover_categories().await;
        if available.is_empty() {
            tracing::warn!("No categories discovered, nothing to crawl");
            return Ok(summary);
        }

        let (selected, unknown) = Self::select_categories(&available, selection);
        for name in &unknown {
            tracing::warn!("Category '{}' not found", name);
        }
        if selected.is_empty() {
            let names: Vec<&str> = available.iter().map(|c| c.name.as_str()).collect();
            tracing::error!(
                "No valid categories selected. Available: {}",
                names.join(", ")
            );
            return Ok(summary);
        }

        let mut throttle = Throttle::new(Duration::from_millis(self.config.crawl.request_delay_ms));
        let mut category_throttle =
            Throttle::new(Duration::from_millis(self.config.crawl.category_delay_ms));

        let data_dir = self.config.output.data_dir();
        let images_dir = self.config.output.images_dir();
        let mut all_records: Vec<Record> = Vec::new();

        for (index, category) in selected.iter().enumerate() {
            if self.shutdown.load(Ordering::Relaxed) {
                summary.interrupted = true;
                break;
            }
            category_throttle.wait().await;

            tracing::info!(
                "Category {}/{}: {}",
                index + 1,
                selected.len(),
                category.name
            );

            let records = self
                .crawl_category(category, &mut throttle, &mut summary)
                .await;
            summary.categories_processed += 1;

            if records.is_empty() {
                tracing::info!("Category '{}' produced no records", category.name);
            } else {
                let path = data_dir.join(format!("{}.csv", category.slug));
                match write_records(&records, &path) {
                    Ok(()) => summary.records_written += records.len(),
                    Err(e) => {
                        // Contained: this category's save is skipped, the
                        // run moves on.
                        tracing::error!(
                            "Cannot save category '{}' to {}: {}",
                            category.name,
                            path.display(),
                            e
                        );
                    }
                }
            }

            if download_images {
                self.download_category_images(&records, &images_dir, &mut throttle, &mut summary)
                    .await;
            }

            all_records.extend(records);
        }

        // The all-categories run also gets one combined file, like any
        // explicitly requested combined output.
        if matches!(selection, CategorySelection::All) && !all_records.is_empty() {
            let path = data_dir.join("all_items.csv");
            if let Err(e) = write_records(&all_records, &path) {
                tracing::error!("Cannot save combined output to {}: {}", path.display(), e);
            }
        }
        if let Some(path) = combined_output {
            if let Err(e) = write_records(&all_records, path) {
                tracing::error!("Cannot save combined output to {}: {}", path.display(), e);
            }
        }

        tracing::info!(
            "Run finished: {} records across {} categories",
            summary.records_extracted,
            summary.categories_processed
        );
        Ok(summary)
    }

    /// Crawls one category: walks its listing pages, then fetches and
    /// extracts every item in listing order
    async fn crawl_category(
        &self,
        category: &Category,
        throttle: &mut Throttle,
        summary: &mut RunSummary,
    ) -> Vec<Record> {
        tracing::info!("Walking {}", category.url);

        let walker = PaginationWalker::new(&self.client, &self.resolver, self.config.crawl.max_pages);
        let outcome = walker.walk(&category.url, throttle, &self.shutdown).await;
        summary.pages_fetched += outcome.pages_fetched;

        if let Some(reason) = &outcome.stopped_early {
            tracing::warn!("Category '{}' stopped early: {}", category.name, reason);
        }

        let mut records = Vec::new();
        for item_url in &outcome.item_urls {
            if self.shutdown.load(Ordering::Relaxed) {
                summary.interrupted = true;
                break;
            }
            throttle.wait().await;

            let fetched = fetch_page(&self.client, item_url).await;
            match fetched.status {
                PageStatus::Ok(body) => {
                    match extract(&body, category, item_url, &self.resolver) {
                        Ok(record) => {
                            tracing::debug!("  '{}' - {}", record.title, record.price);
                            summary.records_extracted += 1;
                            records.push(record);
                        }
                        Err(e) => {
                            tracing::warn!("Extraction failed: {}", e);
                            summary.extraction_failures += 1;
                        }
                    }
                }
                status => {
                    tracing::warn!(
                        "Detail page {} failed ({}), skipping item",
                        item_url,
                        status.describe()
                    );
                    summary.extraction_failures += 1;
                }
            }
        }

        tracing::info!(
            "Category '{}' done: {} records from {} pages",
            category.name,
            records.len(),
            outcome.pages_fetched
        );
        records
    }

    /// Downloads cover images for a category's records
    async fn download_category_images(
        &self,
        records: &[Record],
        images_dir: &Path,
        throttle: &mut Throttle,
        summary: &mut RunSummary,
    ) {
        for record in records {
            if self.shutdown.load(Ordering::Relaxed) {
                summary.interrupted = true;
                return;
            }
            if record.image_url.is_none() {
                continue;
            }
            throttle.wait().await;

            if download_image(&self.client, record, images_dir).await {
                summary.images_downloaded += 1;
            } else {
                summary.images_failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<Category> {
        vec![
            Category::new("Travel", "http://example.com/travel/index.html"),
            Category::new("Mystery", "http://example.com/mystery/index.html"),
            Category::new("Science Fiction", "http://example.com/scifi/index.html"),
        ]
    }

    #[test]
    fn test_select_all() {
        let (selected, unknown) =
            Coordinator::select_categories(&available(), &CategorySelection::All);
        assert_eq!(selected.len(), 3);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_select_named_is_case_insensitive() {
        let selection = CategorySelection::Named(vec!["travel".to_string()]);
        let (selected, unknown) = Coordinator::select_categories(&available(), &selection);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Travel");
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_select_preserves_requested_order() {
        let selection = CategorySelection::Named(vec![
            "Mystery".to_string(),
            "Travel".to_string(),
        ]);
        let (selected, _) = Coordinator::select_categories(&available(), &selection);
        assert_eq!(selected[0].name, "Mystery");
        assert_eq!(selected[1].name, "Travel");
    }

    #[test]
    fn test_select_reports_unknown_names() {
        let selection = CategorySelection::Named(vec![
            "Travel".to_string(),
            "Cooking".to_string(),
        ]);
        let (selected, unknown) = Coordinator::select_categories(&available(), &selection);
        assert_eq!(selected.len(), 1);
        assert_eq!(unknown, vec!["Cooking".to_string()]);
    }

    // Full crawl behavior is exercised against a mock server in the
    // end-to-end tests.
}
