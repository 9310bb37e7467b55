//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with the configured header set and timeout
//! - GET requests for page content and image bytes
//! - Classifying outcomes so callers can contain failures

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Classified outcome of fetching one page
///
/// None of these are fatal to the run; the caller decides whether to skip
/// the item, stop the category, or carry on.
#[derive(Debug)]
pub enum PageStatus {
    /// 2xx response with a body
    Ok(String),

    /// Non-2xx response
    HttpError(u16),

    /// Connection-level failure (refused, DNS, TLS, body read)
    NetworkError(String),

    /// The request exceeded the configured timeout
    Timeout,
}

impl PageStatus {
    /// Short description of a failed status for logs and summaries
    pub fn describe(&self) -> String {
        match self {
            PageStatus::Ok(_) => "ok".to_string(),
            PageStatus::HttpError(code) => format!("HTTP {}", code),
            PageStatus::NetworkError(message) => format!("network error: {}", message),
            PageStatus::Timeout => "request timeout".to_string(),
        }
    }
}

/// Result of a fetch operation, consumed immediately by the caller
#[derive(Debug)]
pub struct PageFetchResult {
    /// The URL that was requested
    pub url: String,

    /// The classified outcome
    pub status: PageStatus,
}

/// Builds an HTTP client with the configured headers and timeout
///
/// # Arguments
///
/// * `config` - The outbound HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page and classifies the outcome
///
/// No automatic retry: a failed fetch is reported once and the caller
/// chooses the containment level.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> PageFetchResult {
    let status = match client.get(url).send().await {
        Ok(response) => {
            let code = response.status();
            if !code.is_success() {
                PageStatus::HttpError(code.as_u16())
            } else {
                match response.text().await {
                    Ok(body) => PageStatus::Ok(body),
                    Err(e) => PageStatus::NetworkError(format!("body read failed: {}", e)),
                }
            }
        }
        Err(e) => classify_transport_error(&e),
    };

    PageFetchResult {
        url: url.to_string(),
        status,
    }
}

/// Fetches raw bytes, for image downloads
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The response body
/// * `Err(reqwest::Error)` - Transport failure or non-2xx status
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn classify_transport_error(error: &reqwest::Error) -> PageStatus {
    if error.is_timeout() {
        PageStatus::Timeout
    } else if error.is_connect() {
        PageStatus::NetworkError(format!("connection failed: {}", error))
    } else {
        PageStatus::NetworkError(error.to_string())
    }
}
