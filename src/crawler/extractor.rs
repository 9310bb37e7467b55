//! Detail-page field extraction
//!
//! Turns one fetched detail page into a `Record`. Extraction never fails on
//! a single bad field: each field parses independently and falls back to a
//! default, so one missing element cannot cost the whole record. Only a
//! document with no content at all is an extraction failure.

use crate::records::{Category, Record};
use crate::url::UrlResolver;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Placeholder title for pages without a primary heading
pub const MISSING_TITLE: &str = "Unknown title";

/// Availability marker for pages without a stock element
pub const MISSING_AVAILABILITY: &str = "Unavailable";

/// The detail page yielded no usable document
///
/// Raised only for an empty body; a malformed-but-present document still
/// produces a record with defaulted fields.
#[derive(Debug, Error)]
#[error("no document content for {url}")]
pub struct ExtractionFailure {
    pub url: String,
}

/// Extracts a record from a detail-page document
///
/// # Arguments
///
/// * `html` - The fetched page body
/// * `category` - The category this item was listed under
/// * `product_url` - Absolute URL of the detail page
/// * `resolver` - Resolver for the image source
///
/// # Returns
///
/// * `Ok(Record)` - Always, for any non-empty document
/// * `Err(ExtractionFailure)` - The body was empty
pub fn extract(
    html: &str,
    category: &Category,
    product_url: &str,
    resolver: &UrlResolver,
) -> Result<Record, ExtractionFailure> {
    if html.trim().is_empty() {
        return Err(ExtractionFailure {
            url: product_url.to_string(),
        });
    }

    let document = Html::parse_document(html);

    let title = select_text(&document, "h1").unwrap_or_else(|| {
        tracing::debug!("No title on {}", product_url);
        MISSING_TITLE.to_string()
    });

    let price = match select_text(&document, "p.price_color") {
        Some(raw) => parse_price(&raw),
        None => {
            tracing::debug!("No price on {}", product_url);
            0.0
        }
    };

    let availability =
        select_text(&document, "p.instock").unwrap_or_else(|| MISSING_AVAILABILITY.to_string());

    let rating = select_class_attr(&document, "p.star-rating")
        .map(|classes| rating_from_class(&classes))
        .unwrap_or(0);

    let description = extract_description(&document);

    let image_url = select_image_src(&document).map(|src| resolver.resolve_image(&src));

    Ok(Record {
        title,
        price,
        availability,
        rating,
        description,
        image_url,
        category: category.clone(),
        product_url: product_url.to_string(),
    })
}

/// Parses a price string by stripping everything but digits and the point
///
/// Tolerates currency glyphs and their mis-decoded variants (`£51.77`,
/// `Â£51.77`); anything that still fails to parse defaults to 0.0.
pub(crate) fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Maps a star-rating class string to a rating in 0..=5
///
/// The rating element carries the count as a class token; an absent or
/// unrecognized token maps to 0.
pub(crate) fn rating_from_class(class_attr: &str) -> u8 {
    const STARS: [(&str, u8); 5] = [
        ("One", 1),
        ("Two", 2),
        ("Three", 3),
        ("Four", 4),
        ("Five", 5),
    ];

    for (token, value) in STARS {
        if class_attr.contains(token) {
            return value;
        }
    }
    0
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn select_class_attr(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("class"))
        .map(|classes| classes.to_string())
}

/// The description is the paragraph following the description anchor, not a
/// child of it.
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("#product_description").ok()?;
    let anchor = document.select(&selector).next()?;

    for sibling in anchor.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if element.value().name() == "p" {
                let text = element.text().collect::<String>().trim().to_string();
                return (!text.is_empty()).then_some(text);
            }
        }
    }
    None
}

fn select_image_src(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.item img").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("src"))
        .map(|src| src.to_string())
}
