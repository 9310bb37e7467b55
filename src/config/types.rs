use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for bookhaul
///
/// Every section has working defaults, so a config file is optional; CLI
/// flags override individual values after loading.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

/// Target site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the catalog site, with trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Root under which detail pages live, with trailing slash
    #[serde(rename = "catalogue-root")]
    pub catalogue_root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://books.toscrape.com/".to_string(),
            catalogue_root: "http://books.toscrape.com/catalogue/".to_string(),
        }
    }
}

/// Outbound HTTP behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept_language: "en-GB,en;q=0.9".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Traversal pacing and limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Minimum gap between any two outbound requests, in milliseconds
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Minimum gap between two categories, in milliseconds
    #[serde(rename = "category-delay-ms")]
    pub category_delay_ms: u64,

    /// Cap on listing pages fetched per category; absent means no cap
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            category_delay_ms: 2000,
            max_pages: None,
        }
    }
}

/// Output destinations
///
/// The output directory is an explicit value threaded through the
/// orchestrator and persister; nothing in the crate mutates a global path.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives the data/ and images/ trees
    #[serde(rename = "out-dir")]
    pub out_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: "outputs".to_string(),
        }
    }
}

impl OutputConfig {
    /// Directory for per-category CSV files
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.out_dir).join("data")
    }

    /// Directory for downloaded image assets
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.out_dir).join("images")
    }
}
