use thiserror::Error;

/// Errors raised while building model values from configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("modality group list is empty")]
    NoGroups,

    #[error("modality group name must not be empty")]
    EmptyGroupName,

    #[error("modality group '{name}' lists no modalities")]
    EmptyGroup { name: String },

    #[error("modality group '{name}' is defined more than once")]
    DuplicateGroup { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
