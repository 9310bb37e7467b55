//! URL handling for the catalog site
//!
//! The site emits item links in several inconsistent relative-path
//! conventions; this module reconstructs absolute URLs from them.

mod resolve;

pub use resolve::UrlResolver;
