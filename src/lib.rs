//! Bookhaul: a category-by-category catalog scraper
//!
//! This crate crawls a paginated, category-organized catalog site, extracts
//! one structured record per item, and persists the results as CSV files
//! plus optional image assets.

pub mod config;
pub mod crawler;
pub mod output;
pub mod records;
pub mod url;

use thiserror::Error;

/// Main error type for bookhaul operations
///
/// Only hard failures live here. Per-page fetch outcomes are a status enum
/// (`crawler::PageStatus`) because they are routine and contained by the
/// caller, not propagated.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for bookhaul operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::records::{Category, Record};
pub use crate::url::UrlResolver;
