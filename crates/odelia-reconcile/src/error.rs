//! Error types for reconciliation.

use thiserror::Error;

use odelia_ingest::IngestError;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No column looks like a diagnosis label and none was given.
    #[error(
        "could not detect a label column; pass the column name explicitly (available columns: [{}])",
        available.join(", ")
    )]
    LabelColumnNotFound { available: Vec<String> },

    /// An explicitly named label column does not exist.
    #[error(
        "label column '{column}' not found (available columns: [{}])",
        available.join(", ")
    )]
    UnknownLabelColumn {
        column: String,
        available: Vec<String>,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
