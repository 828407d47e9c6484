//! Typed view over raw CSV cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens read as a missing value.
const NULL_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "<na>", "#n/a"];

/// A single cell value with the type a dataframe reader would infer for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Infers the type of a raw cell.
    ///
    /// Empty cells and the usual missing-value markers become `Null`,
    /// `true`/`false` in any case become `Bool`, integer and finite float
    /// literals become numbers, and everything else stays text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        if NULL_TOKENS.contains(&lowered.as_str()) {
            return Self::Null;
        }
        match lowered.as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>()
            && value.is_finite()
        {
            return Self::Float(value);
        }
        Self::Text(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as a finite number when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Null | Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::infer(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_missing_values() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("  "), CellValue::Null);
        assert_eq!(CellValue::infer("NaN"), CellValue::Null);
        assert_eq!(CellValue::infer("NA"), CellValue::Null);
    }

    #[test]
    fn infers_booleans_case_insensitively() {
        assert_eq!(CellValue::infer("True"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("FALSE"), CellValue::Bool(false));
        assert_eq!(CellValue::infer("t"), CellValue::Text("t".to_string()));
    }

    #[test]
    fn infers_numbers() {
        assert_eq!(CellValue::infer("2"), CellValue::Int(2));
        assert_eq!(CellValue::infer(" -7 "), CellValue::Int(-7));
        assert_eq!(CellValue::infer("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::infer("inf"), CellValue::Text("inf".to_string()));
    }

    #[test]
    fn none_stays_text() {
        assert_eq!(CellValue::infer("None"), CellValue::Text("None".to_string()));
    }

    #[test]
    fn displays_booleans_like_dataframe_exports() {
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn numeric_view() {
        assert_eq!(CellValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Text(" 4.5".to_string()).as_f64(), Some(4.5));
        assert_eq!(CellValue::Bool(true).as_f64(), None);
    }
}
