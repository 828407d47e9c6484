//! Metadata table ingestion.
//!
//! Loads the per-split `metadata.csv` written by the dataset export into a
//! [`MetadataTable`], and resolves where that file lives for a given
//! [`DatasetLayout`].
//!
//! # Example
//!
//! ```ignore
//! use odelia_ingest::{DatasetLayout, read_metadata_table};
//!
//! let layout = DatasetLayout::new("/data/odelia", "unilateral", "val");
//! let table = read_metadata_table(&layout.metadata_path())?;
//! let cases = table.to_cases(Some("Lesion"))?;
//! ```

mod error;
mod layout;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Dataset Layout ===
pub use layout::{DatasetLayout, METADATA_FILE_NAME};

// === CSV Reading ===
pub use table::{MetadataTable, parse_metadata_csv, read_metadata_table};
