//! Image asset downloads
//!
//! Each record may carry one cover image, written under a per-category
//! folder with a filename derived from the item title. A failed download
//! only costs that one image.

use crate::crawler::fetcher::fetch_bytes;
use crate::records::Record;
use reqwest::Client;
use std::path::Path;

const MAX_FILENAME_CHARS: usize = 100;

/// Derives a safe image filename stem from an item title
///
/// Keeps letters, digits, spaces, hyphens and underscores; collapses
/// whitespace runs to single underscores; truncates to a bounded length.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// Downloads one record's image under `<images_dir>/<category_slug>/`
///
/// Returns whether the image landed on disk. Every failure path is logged
/// and reported as `false`; none of them aborts the batch.
pub async fn download_image(client: &Client, record: &Record, images_dir: &Path) -> bool {
    let Some(image_url) = record.image_url.as_deref() else {
        return false;
    };

    let category_dir = images_dir.join(&record.category.slug);
    if let Err(e) = std::fs::create_dir_all(&category_dir) {
        tracing::warn!(
            "Cannot create image directory {}: {}",
            category_dir.display(),
            e
        );
        return false;
    }

    let filename = format!("{}.jpg", sanitize_title(&record.title));
    let destination = category_dir.join(&filename);

    match fetch_bytes(client, image_url).await {
        Ok(bytes) => match std::fs::write(&destination, &bytes) {
            Ok(()) => {
                tracing::debug!("Downloaded image {}", destination.display());
                true
            }
            Err(e) => {
                tracing::warn!("Cannot write image {}: {}", destination.display(), e);
                false
            }
        },
        Err(e) => {
            tracing::warn!("Image fetch failed for {}: {}", image_url, e);
            false
        }
    }
}
