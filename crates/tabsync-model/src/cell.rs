#![deny(unsafe_code)]

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell in a workbook grid.
///
/// Formulas are opaque: the engine writes them for the host spreadsheet to
/// evaluate and never interprets them beyond string comparison.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Formula(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Parse a raw string (e.g. a CSV field) into the most specific variant.
    ///
    /// Leading `=` marks a formula. Numbers, ISO dates and ISO datetimes are
    /// recognized; everything else stays text. Empty input is `Blank`.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Blank;
        }
        if trimmed.starts_with('=') {
            return CellValue::Formula(trimmed.to_string());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT) {
            return CellValue::DateTime(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return CellValue::Date(date);
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            return CellValue::Number(if number.is_nan() { 0.0 } else { number });
        }
        CellValue::Text(raw.to_string())
    }

    /// String coercion used for keys, status comparison and CSV output.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(value) => value.clone(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Date(value) => value.format(DATE_FORMAT).to_string(),
            CellValue::DateTime(value) => value.format(DATETIME_FORMAT).to_string(),
            CellValue::Formula(value) => value.clone(),
        }
    }

    /// Numeric coercion. Malformed input yields `None`; NaN yields zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(if value.is_nan() { 0.0 } else { *value }),
            CellValue::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(value) => Some(*value),
            CellValue::DateTime(value) => Some(value.date()),
            CellValue::Text(value) => NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok(),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(value) => Some(*value),
            CellValue::Date(value) => value.and_hms_opt(0, 0, 0),
            CellValue::Text(value) => {
                NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).ok()
            }
            _ => None,
        }
    }

    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Blank
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_classifies_variants() {
        assert_eq!(CellValue::from_input(""), CellValue::Blank);
        assert_eq!(CellValue::from_input("  "), CellValue::Blank);
        assert_eq!(CellValue::from_input("12.5"), CellValue::Number(12.5));
        assert_eq!(
            CellValue::from_input("=SUM(A1:B1)"),
            CellValue::Formula("=SUM(A1:B1)".to_string())
        );
        assert_eq!(
            CellValue::from_input("2026-03-01"),
            CellValue::Date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
        assert_eq!(
            CellValue::from_input("MX-102"),
            CellValue::Text("MX-102".to_string())
        );
    }

    #[test]
    fn malformed_values_coerce_to_none() {
        assert_eq!(CellValue::text("not a number").as_number(), None);
        assert_eq!(CellValue::text("2026-13-99").as_date(), None);
        assert_eq!(CellValue::Blank.as_datetime(), None);
    }

    #[test]
    fn nan_coerces_to_zero() {
        assert_eq!(CellValue::Number(f64::NAN).as_number(), Some(0.0));
    }

    #[test]
    fn number_text_renders_integers_without_fraction() {
        assert_eq!(CellValue::Number(4.0).as_text(), "4");
        assert_eq!(CellValue::Number(4.25).as_text(), "4.25");
    }

    #[test]
    fn date_and_datetime_round_trip_as_text() {
        let cell = CellValue::from_input("2026-03-01 08:30:00");
        assert_eq!(cell.as_text(), "2026-03-01 08:30:00");
        assert!(cell.as_datetime().is_some());
    }
}
