//! On-disk layout of an exported dataset split.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of the per-split metadata table.
pub const METADATA_FILE_NAME: &str = "metadata.csv";

/// Location of one exported split: `<root>/<config>/<split>/`.
///
/// The export writes one directory per institution and case below the
/// split directory, plus a `metadata.csv` describing every case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLayout {
    pub root: PathBuf,
    pub config: String,
    pub split: String,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>, config: impl Into<String>, split: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            config: config.into(),
            split: split.into(),
        }
    }

    pub fn split_dir(&self) -> PathBuf {
        self.root.join(&self.config).join(&self.split)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.split_dir().join(METADATA_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_split_paths() {
        let layout = DatasetLayout::new("/data", "unilateral", "val");
        assert_eq!(layout.split_dir(), PathBuf::from("/data/unilateral/val"));
        assert_eq!(
            layout.metadata_path(),
            PathBuf::from("/data/unilateral/val/metadata.csv")
        );
    }
}
