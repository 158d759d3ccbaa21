use crate::schema::CellValue;

/// Coerce a raw cell into an amount, if it carries one.
///
/// Numeric cells pass through unchanged. Text cells are trimmed and stripped
/// of thousands separators; an amount wrapped in parentheses is negative
/// (accounting convention), so `"(1,234)"` becomes `-1234.0`. A sign inside
/// the parentheses is malformed, like `"(-500)"`. Anything that fails to
/// parse as a finite float is missing, never an error.
pub fn coerce_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Empty => None,
        CellValue::Text(raw) => coerce_text(raw),
    }
}

fn coerce_text(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if let Some(inner) = cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        if inner.starts_with(['+', '-']) {
            return None;
        }
        return parse_finite(inner).map(|v| -v);
    }

    parse_finite(&cleaned)
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells_pass_through() {
        assert_eq!(coerce_value(&CellValue::Number(1234.5)), Some(1234.5));
        assert_eq!(coerce_value(&CellValue::Number(0.0)), Some(0.0));
        assert_eq!(coerce_value(&CellValue::Number(-62000.0)), Some(-62000.0));
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(coerce_value(&CellValue::Empty), None);
        assert_eq!(coerce_value(&"".into()), None);
        assert_eq!(coerce_value(&"   ".into()), None);
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(coerce_value(&"1,234".into()), Some(1234.0));
        assert_eq!(coerce_value(&"1,350,000".into()), Some(1_350_000.0));
        assert_eq!(coerce_value(&"1,234.56".into()), Some(1234.56));
    }

    #[test]
    fn test_parenthesized_amounts_are_negative() {
        assert_eq!(coerce_value(&"(1,234)".into()), Some(-1234.0));
        assert_eq!(coerce_value(&"(500.25)".into()), Some(-500.25));
    }

    #[test]
    fn test_signed_parenthesized_amounts_are_malformed() {
        assert_eq!(coerce_value(&"(-500)".into()), None);
        assert_eq!(coerce_value(&"(+500)".into()), None);
        assert_eq!(coerce_value(&"(-1,234)".into()), None);
    }

    #[test]
    fn test_plain_negatives_and_whitespace() {
        assert_eq!(coerce_value(&"-500".into()), Some(-500.0));
        assert_eq!(coerce_value(&"  42000  ".into()), Some(42000.0));
    }

    #[test]
    fn test_unparseable_text_is_missing() {
        assert_eq!(coerce_value(&"n/a".into()), None);
        assert_eq!(coerce_value(&"12.5%".into()), None);
        assert_eq!(coerce_value(&"$1234".into()), None);
        assert_eq!(coerce_value(&"nan".into()), None);
        assert_eq!(coerce_value(&"inf".into()), None);
    }

    #[test]
    fn test_coercion_is_idempotent_on_numbers() {
        let once = coerce_value(&"(1,234)".into()).unwrap();
        assert_eq!(coerce_value(&CellValue::Number(once)), Some(once));
    }
}
