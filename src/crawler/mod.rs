//! Crawling pipeline: fetching, discovery, pagination, extraction,
//! throttling, and orchestration

pub mod coordinator;
pub mod discovery;
pub mod extractor;
pub mod fetcher;
pub mod throttle;
pub mod walker;

pub use coordinator::{CategorySelection, Coordinator};
pub use discovery::discover;
pub use extractor::{extract, ExtractionFailure};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page, PageFetchResult, PageStatus};
pub use throttle::Throttle;
pub use walker::{PaginationWalker, WalkOutcome};
