//! End-of-run reporting
//!
//! Every run, interrupted or not, ends by printing these totals.

/// Aggregated counters for one crawl run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Categories fully processed (walked and persisted)
    pub categories_processed: u32,

    /// Listing pages fetched across all categories
    pub pages_fetched: u32,

    /// Records successfully extracted
    pub records_extracted: usize,

    /// Records written to CSV files (per-category files only)
    pub records_written: usize,

    /// Detail pages that produced no record
    pub extraction_failures: u32,

    /// Images written to disk
    pub images_downloaded: u32,

    /// Image downloads that failed
    pub images_failed: u32,

    /// Whether the run was cut short by an interrupt
    pub interrupted: bool,
}

/// Prints the run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Categories processed: {}", summary.categories_processed);
    println!("Listing pages fetched: {}", summary.pages_fetched);
    println!("Records extracted: {}", summary.records_extracted);
    println!("Records written: {}", summary.records_written);

    if summary.extraction_failures > 0 {
        println!("Extraction failures: {}", summary.extraction_failures);
    }

    if summary.images_downloaded > 0 || summary.images_failed > 0 {
        println!(
            "Images: {} downloaded, {} failed",
            summary.images_downloaded, summary.images_failed
        );
    }

    if summary.interrupted {
        println!("\nRun interrupted; output written so far is complete and valid.");
    }
}
