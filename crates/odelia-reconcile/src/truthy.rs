//! Presence flag coercion.

use odelia_model::CellValue;

/// Spellings of "present", compared after trimming and case-folding.
pub const TRUTHY_LITERALS: [&str; 4] = ["1", "true", "t", "yes"];

/// Returns whether a raw flag spelling means "present".
pub fn is_truthy_text(raw: &str) -> bool {
    let folded = raw.trim().to_lowercase();
    TRUTHY_LITERALS.contains(&folded.as_str())
}

/// Returns whether a flag cell means "present". Anything unrecognized,
/// including a missing value, is false.
pub fn is_truthy(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(flag) => *flag,
        CellValue::Int(number) => *number == 1,
        CellValue::Float(number) => *number == 1.0,
        CellValue::Text(text) => is_truthy_text(text),
        CellValue::Null => false,
    }
}
