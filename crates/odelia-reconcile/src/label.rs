//! Diagnosis label normalization.
//!
//! Sources encode the diagnosis as integer class codes (`0` malignant,
//! `1` benign, `2` no lesion) or as free text in any spelling. Both map
//! onto [`CanonicalLabel`]; anything else is passed through case-folded.
//! Normalization is total and never fails.

use odelia_model::{CanonicalLabel, CellValue, NormalizedLabel};

const NO_LESION_ALIASES: &[&str] = &["nolesion", "no_lesion", "none"];

/// Normalizes a typed cell value.
pub fn normalize_label(value: &CellValue) -> NormalizedLabel {
    match value {
        CellValue::Null => NormalizedLabel::Other(String::new()),
        CellValue::Bool(flag) => normalize_label_text(if *flag { "true" } else { "false" }),
        CellValue::Int(code) => match CanonicalLabel::from_code(*code) {
            Some(label) => label.into(),
            None => NormalizedLabel::Other(code.to_string()),
        },
        CellValue::Float(number) => match label_from_number(*number) {
            Some(label) => label.into(),
            None => NormalizedLabel::Other(number.to_string()),
        },
        CellValue::Text(text) => normalize_label_text(text),
    }
}

/// Normalizes raw label text.
pub fn normalize_label_text(raw: &str) -> NormalizedLabel {
    let folded = raw.trim().to_lowercase();

    if let Ok(number) = folded.parse::<f64>()
        && let Some(label) = label_from_number(number)
    {
        return label.into();
    }
    if folded.contains("malig") {
        return CanonicalLabel::Malignant.into();
    }
    if folded.contains("benig") {
        return CanonicalLabel::Benign.into();
    }
    if (folded.contains("no") && folded.contains("lesion"))
        || NO_LESION_ALIASES.contains(&folded.as_str())
    {
        return CanonicalLabel::NoLesion.into();
    }
    let literal = match folded.as_str() {
        "0" => CanonicalLabel::from_code(0),
        "1" => CanonicalLabel::from_code(1),
        "2" => CanonicalLabel::from_code(2),
        _ => None,
    };
    match literal {
        Some(label) => label.into(),
        None => NormalizedLabel::Other(folded),
    }
}

/// Truncates a finite number to an integer class code.
fn label_from_number(number: f64) -> Option<CanonicalLabel> {
    if !number.is_finite() {
        return None;
    }
    CanonicalLabel::from_code(number.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canonical(value: &CellValue) -> Option<CanonicalLabel> {
        normalize_label(value).canonical()
    }

    #[test]
    fn malignant_spellings() {
        for value in [
            CellValue::Int(0),
            CellValue::infer("0"),
            CellValue::infer("Malignant"),
            CellValue::infer("MALIG"),
            CellValue::infer("malig_type_a"),
        ] {
            assert_eq!(canonical(&value), Some(CanonicalLabel::Malignant), "{value:?}");
        }
    }

    #[test]
    fn no_lesion_spellings() {
        for value in [
            CellValue::Int(2),
            CellValue::infer("2"),
            CellValue::infer("No Lesion"),
            CellValue::infer("nolesion"),
            CellValue::infer("NO_LESION"),
            CellValue::infer("None"),
        ] {
            assert_eq!(canonical(&value), Some(CanonicalLabel::NoLesion), "{value:?}");
        }
    }

    #[test]
    fn benign_spellings() {
        assert_eq!(canonical(&CellValue::Int(1)), Some(CanonicalLabel::Benign));
        assert_eq!(canonical(&CellValue::infer(" Benign ")), Some(CanonicalLabel::Benign));
        assert_eq!(canonical(&CellValue::Float(1.0)), Some(CanonicalLabel::Benign));
    }

    #[test]
    fn numbers_are_truncated_to_codes() {
        assert_eq!(
            normalize_label_text("1.9").canonical(),
            Some(CanonicalLabel::Benign)
        );
        assert_eq!(canonical(&CellValue::Float(2.5)), Some(CanonicalLabel::NoLesion));
    }

    #[test]
    fn unknown_label_is_folded_and_kept() {
        let label = normalize_label(&CellValue::infer("Unknown_XYZ"));
        assert_eq!(label, NormalizedLabel::Other("unknown_xyz".to_string()));
    }

    #[test]
    fn out_of_range_codes_pass_through() {
        assert_eq!(
            normalize_label(&CellValue::Int(7)),
            NormalizedLabel::Other("7".to_string())
        );
        assert_eq!(
            normalize_label(&CellValue::Float(3.5)),
            NormalizedLabel::Other("3.5".to_string())
        );
    }

    #[test]
    fn missing_and_boolean_labels_pass_through() {
        assert_eq!(
            normalize_label(&CellValue::Null),
            NormalizedLabel::Other(String::new())
        );
        assert_eq!(
            normalize_label(&CellValue::Bool(true)),
            NormalizedLabel::Other("true".to_string())
        );
    }

    proptest! {
        #[test]
        fn text_normalization_is_total_and_deterministic(raw in any::<String>()) {
            let first = normalize_label_text(&raw);
            let second = normalize_label_text(&raw);
            prop_assert_eq!(&first, &second);
            if let NormalizedLabel::Other(text) = first {
                prop_assert_eq!(text, raw.trim().to_lowercase());
            }
        }

        #[test]
        fn inferred_cells_never_panic(raw in "\\PC{0,16}") {
            let _ = normalize_label(&CellValue::infer(&raw));
        }

        #[test]
        fn integer_codes_map_to_their_table(code in 0i64..3) {
            prop_assert_eq!(
                normalize_label(&CellValue::Int(code)).canonical(),
                CanonicalLabel::from_code(code)
            );
        }
    }
}
