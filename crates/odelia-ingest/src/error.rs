//! Error types for metadata ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a metadata table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV records.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Required column not found in the table.
    #[error(
        "required column '{column}' not found; available columns: [{}]",
        available.join(", ")
    )]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}

impl IngestError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/metadata.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/metadata.csv");
    }

    #[test]
    fn test_missing_column_lists_available() {
        let err = IngestError::MissingColumn {
            column: "UID".to_string(),
            available: vec!["Institution".to_string(), "has_T2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "required column 'UID' not found; available columns: [Institution, has_T2]"
        );
    }

    #[test]
    fn test_open_maps_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            IngestError::open("x.csv", io),
            IngestError::FileNotFound { .. }
        ));
    }
}
