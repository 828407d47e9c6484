//! Diagnosis label vocabulary.

use std::fmt;

use serde::{Serialize, Serializer};

/// Column holding the normalized label in exported indices.
pub const NORMALIZED_LABEL_COLUMN: &str = "Lesion_Normalized";

/// The closed diagnosis vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalLabel {
    Malignant,
    Benign,
    NoLesion,
}

impl CanonicalLabel {
    /// All canonical labels in report order.
    pub const ALL: [CanonicalLabel; 3] = [Self::Malignant, Self::Benign, Self::NoLesion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malignant => "malignant",
            Self::Benign => "benign",
            Self::NoLesion => "no lesion",
        }
    }

    /// Maps the dataset's integer class codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Malignant),
            1 => Some(Self::Benign),
            2 => Some(Self::NoLesion),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CanonicalLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Result of normalizing a raw label.
///
/// Values that cannot be mapped are kept as their case-folded text so that
/// per-row exports still show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedLabel {
    Canonical(CanonicalLabel),
    Other(String),
}

impl NormalizedLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Canonical(label) => label.as_str(),
            Self::Other(text) => text,
        }
    }

    pub fn canonical(&self) -> Option<CanonicalLabel> {
        match self {
            Self::Canonical(label) => Some(*label),
            Self::Other(_) => None,
        }
    }
}

impl From<CanonicalLabel> for NormalizedLabel {
    fn from(label: CanonicalLabel) -> Self {
        Self::Canonical(label)
    }
}

impl fmt::Display for NormalizedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_canonical_labels() {
        assert_eq!(CanonicalLabel::from_code(0), Some(CanonicalLabel::Malignant));
        assert_eq!(CanonicalLabel::from_code(1), Some(CanonicalLabel::Benign));
        assert_eq!(CanonicalLabel::from_code(2), Some(CanonicalLabel::NoLesion));
        assert_eq!(CanonicalLabel::from_code(3), None);
    }

    #[test]
    fn other_labels_keep_their_text() {
        let label = NormalizedLabel::Other("unknown_xyz".to_string());
        assert_eq!(label.as_str(), "unknown_xyz");
        assert_eq!(label.canonical(), None);
    }

    #[test]
    fn canonical_label_serializes_as_text() {
        let json = serde_json::to_string(&CanonicalLabel::NoLesion).expect("serialize");
        assert_eq!(json, "\"no lesion\"");
    }
}
