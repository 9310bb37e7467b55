//! CSV persistence
//!
//! One row per record, fixed column order, header always present. Writing
//! truncates the destination, so re-running with the same destination
//! overwrites instead of appending duplicates.

use crate::records::Record;
use crate::Result;
use std::path::Path;

/// Fixed column order of every output file
pub const COLUMNS: [&str; 8] = [
    "title",
    "price",
    "availability",
    "rating",
    "description",
    "image_url",
    "category",
    "product_url",
];

/// Writes records to a CSV file, overwriting any previous content
///
/// The header row is written even for an empty record set so downstream
/// readers always see the column set. Absent description/image fields
/// render as empty cells.
///
/// # Arguments
///
/// * `records` - Records in the order they should appear
/// * `path` - Destination file
pub fn write_records(records: &[Record], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record([
            record.title.clone(),
            record.price.to_string(),
            record.availability.clone(),
            record.rating.to_string(),
            record.description.clone().unwrap_or_default(),
            record.image_url.clone().unwrap_or_default(),
            record.category.name.clone(),
            record.product_url.clone(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
