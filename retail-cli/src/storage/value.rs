//! Cell value representation for workbook tables

use chrono::{NaiveDate, NaiveDateTime};

/// Date cells are persisted and displayed in this format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display form of datetime cells
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of a worksheet table
pub type Row = Vec<CellValue>;

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell
    Empty,
    /// Text value
    Text(String),
    /// Numeric value (integer or decimal)
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Calendar date (no time component)
    Date(NaiveDate),
    /// Date with a time of day; unmanaged sheets keep these as-is
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a number, parsing numeric text
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to get as a flag, accepting yes/no and true/false text
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to get as a date, parsing ISO-formatted text
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            _ => None,
        }
    }

    /// Convert to JSON value for exports
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Empty => serde_json::Value::Null,
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    serde_json::json!(*n as i64)
                } else {
                    serde_json::json!(*n)
                }
            }
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Date(d) => serde_json::Value::String(d.format(DATE_FORMAT).to_string()),
            CellValue::DateTime(dt) => {
                serde_json::Value::String(dt.format(DATETIME_FORMAT).to_string())
            }
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => {
                // Render whole numbers without a trailing ".0" so keys
                // read back from numeric cells compare as written.
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_coerces_whole_numbers() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Number(-7.0).to_string(), "-7");
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Text("P-1".into()).to_string(), "P-1");
        assert_eq!(CellValue::Bool(true).to_string(), "yes");
        assert_eq!(CellValue::Bool(false).to_string(), "no");
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2024-08-01");
        let datetime = date.and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(
            CellValue::DateTime(datetime).to_string(),
            "2024-08-01 14:30:00"
        );
    }

    #[test]
    fn test_as_date_parses_iso_text() {
        let expected = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(
            CellValue::Text("2024-08-01".into()).as_date(),
            Some(expected)
        );
        assert_eq!(CellValue::Date(expected).as_date(), Some(expected));
        assert_eq!(
            CellValue::DateTime(expected.and_hms_opt(14, 30, 0).unwrap()).as_date(),
            Some(expected)
        );
        assert_eq!(CellValue::Text("01.08.2024".into()).as_date(), None);
        assert_eq!(CellValue::Number(45000.0).as_date(), None);
    }

    #[test]
    fn test_as_flag_accepts_text_forms() {
        assert_eq!(CellValue::Bool(true).as_flag(), Some(true));
        assert_eq!(CellValue::Text("Yes".into()).as_flag(), Some(true));
        assert_eq!(CellValue::Text("no".into()).as_flag(), Some(false));
        assert_eq!(CellValue::Text("true".into()).as_flag(), Some(true));
        assert_eq!(CellValue::Text("maybe".into()).as_flag(), None);
        assert_eq!(CellValue::Number(1.0).as_flag(), None);
    }

    #[test]
    fn test_as_number_parses_numeric_text() {
        assert_eq!(CellValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(CellValue::Text(" 120 ".into()).as_number(), Some(120.0));
        assert_eq!(CellValue::Text("abc".into()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_to_json_forms() {
        assert_eq!(CellValue::Empty.to_json(), serde_json::Value::Null);
        assert_eq!(CellValue::Number(10.0).to_json(), serde_json::json!(10));
        assert_eq!(CellValue::Number(0.15).to_json(), serde_json::json!(0.15));
        assert_eq!(CellValue::Bool(true).to_json(), serde_json::json!(true));
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        assert_eq!(
            CellValue::Date(date).to_json(),
            serde_json::json!("2024-08-05")
        );
        assert_eq!(
            CellValue::DateTime(date.and_hms_opt(9, 15, 30).unwrap()).to_json(),
            serde_json::json!("2024-08-05 09:15:30")
        );
    }
}
