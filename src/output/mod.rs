//! Output persistence: CSV records, image assets, and the run summary

pub mod csv_output;
pub mod images;
pub mod summary;

pub use csv_output::{write_records, COLUMNS};
pub use images::{download_image, sanitize_title};
pub use summary::{print_summary, RunSummary};
