//! Core data types: categories and extracted records
//!
//! Both types are fixed-shape: absent fields are explicit `Option`s rather
//! than missing keys, so every consumer sees the same set of fields.

/// A named grouping of catalog items with its own paginated listing
///
/// Created once during discovery and never mutated afterwards. The slug is
/// derived from the name and is safe to use as a file or directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display name as it appears in the site navigation
    pub name: String,

    /// Absolute URL of the category's first listing page
    pub url: String,

    /// Filesystem-safe identifier derived from the name
    pub slug: String,
}

impl Category {
    /// Creates a category, deriving the slug from the name
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name,
            url: url.into(),
            slug,
        }
    }
}

/// One extracted catalog item
///
/// A record is always emitted once a detail page yields any content: fields
/// that fail to parse fall back to defaults instead of failing the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Item title; a placeholder when the page has no primary heading
    pub title: String,

    /// Non-negative price; 0.0 when the price text is unparsable
    pub price: f64,

    /// Free-text availability status
    pub availability: String,

    /// Star rating clamped to 0..=5; 0 when absent or unrecognized
    pub rating: u8,

    /// Product description, when the page carries one
    pub description: Option<String>,

    /// Absolute image URL, when the page carries one
    pub image_url: Option<String>,

    /// The category this record was collected under
    pub category: Category,

    /// Absolute URL of the detail page this record came from
    pub product_url: String,
}

/// Derives a filesystem- and URL-safe slug from a category name
///
/// Lowercases, strips path-breaking characters, and joins whitespace-separated
/// words with underscores. Idempotent: `slugify(slugify(s)) == slugify(s)`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
