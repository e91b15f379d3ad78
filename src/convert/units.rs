//! Unit handling for dimension tokens

use serde_json::Value;

/// Remove a trailing `px` (`"16px"` -> `"16"`). Other units are untouched.
pub fn strip_px(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.strip_suffix("px") {
        Some(number) if parse_number(number).is_some() => number.trim().to_string(),
        _ => trimmed.to_string(),
    }
}

/// Re-append `px` to a plain non-zero number. `"0"`, `"100%"` and values that
/// already carry a unit are returned as-is.
pub fn append_px(value: &str) -> String {
    let trimmed = value.trim();
    match parse_number(trimmed) {
        Some(n) if n != 0.0 => format!("{}px", trimmed),
        _ => trimmed.to_string(),
    }
}

/// Numeric magnitude of a dimension literal: `"16px"`, `"1.5"`, `"0"`.
/// Values in any unit other than `px` (or none) yield `None`.
pub fn parse_dimension(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    parse_number(trimmed.strip_suffix("px").unwrap_or(trimmed).trim())
}

fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format a float for token text: at most four decimals, no trailing zeros,
/// integers without a fractional part.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        return format!("{}", rounded as i64);
    }
    let text = format!("{:.4}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// JSON number for a float, preferring an integer representation
pub fn number_to_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_and_append_px() {
        assert_eq!(strip_px("16px"), "16");
        assert_eq!(strip_px("0.5px"), "0.5");
        assert_eq!(strip_px("100%"), "100%");
        assert_eq!(strip_px("-0.02em"), "-0.02em");

        assert_eq!(append_px("16"), "16px");
        assert_eq!(append_px("0"), "0");
        assert_eq!(append_px("100%"), "100%");
        assert_eq!(append_px("16px"), "16px");
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("24px"), Some(24.0));
        assert_eq!(parse_dimension("1.5"), Some(1.5));
        assert_eq!(parse_dimension("1rem"), None);
        assert_eq!(parse_dimension(""), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.123456), "0.1235");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(number_to_json(400.0), serde_json::json!(400));
        assert_eq!(number_to_json(1.25), serde_json::json!(1.25));
    }
}
