use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates site layout configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_site_url("base-url", &config.base_url)?;
    validate_site_url("catalogue-root", &config.catalogue_root)?;
    Ok(())
}

/// Validates that a site URL is absolute http(s) with a trailing slash
fn validate_site_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }

    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }

    // Resolution is prefix concatenation, so a missing slash would glue the
    // first path segment onto the host or directory name.
    if !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must end with a trailing slash, got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Validates outbound HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates pacing and limit configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.request_delay_ms > 600_000 {
        return Err(ConfigError::Validation(format!(
            "request-delay-ms must be <= 600000, got {}",
            config.request_delay_ms
        )));
    }

    if config.category_delay_ms > 600_000 {
        return Err(ConfigError::Validation(format!(
            "category-delay-ms must be <= 600000, got {}",
            config.category_delay_ms
        )));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.out_dir.is_empty() {
        return Err(ConfigError::Validation(
            "out-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let mut config = Config::default();
        config.site.base_url = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.site.base_url = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_missing_trailing_slash() {
        let mut config = Config::default();
        config.site.catalogue_root = "http://example.com/catalogue".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_unparsable_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_oversized_delay() {
        let mut config = Config::default();
        config.crawl.request_delay_ms = 600_001;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_page_cap() {
        let mut config = Config::default();
        config.crawl.max_pages = Some(0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_out_dir() {
        let mut config = Config::default();
        config.output.out_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
