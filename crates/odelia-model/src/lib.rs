//! Data model for case metadata tables.
//!
//! A metadata table has one row per subject-visit ("case"). Each case
//! carries identifying columns, one `has_<Modality>` presence flag per
//! exported imaging sequence, and optionally a ground-truth diagnosis label
//! whose raw encoding varies between sources.

pub mod case;
pub mod error;
pub mod group;
pub mod label;
pub mod value;

pub use case::{
    CaseRecord, FLAG_PREFIX, FOLD_COLUMN, IDENTIFYING_COLUMNS, INSTITUTION_COLUMN, PATH_COLUMN,
    SPLIT_COLUMN, UID_COLUMN, flag_column, modality_from_flag_column,
};
pub use error::{ModelError, Result};
pub use group::{GroupSet, ModalityGroup, default_groups};
pub use label::{CanonicalLabel, NORMALIZED_LABEL_COLUMN, NormalizedLabel};
pub use value::CellValue;
