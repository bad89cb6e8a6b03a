//! Prompting and input validation for interactive flows

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::Input;

use crate::storage::DATE_FORMAT;

/// Reject blank input, trimming surrounding whitespace
pub fn non_empty(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err("value cannot be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a whole number within an inclusive range
pub fn int_in_range(input: &str, min: i64, max: i64) -> Result<i64, String> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| "enter a whole number".to_string())?;
    if value < min || value > max {
        return Err(format!("number must be between {min} and {max}"));
    }
    Ok(value)
}

/// Parse a decimal greater than zero
pub fn positive_decimal(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| "enter a number".to_string())?;
    if value <= 0.0 {
        return Err("number must be greater than 0".to_string());
    }
    Ok(value)
}

/// Parse an ISO calendar date
pub fn date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| "enter a date as YYYY-MM-DD".to_string())
}

/// Parse a yes/no answer
pub fn yes_no(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err("enter 'yes' or 'no'".to_string()),
    }
}

/// Prompt until the parser accepts the input
pub fn prompt<T>(label: &str, parse: impl Fn(&str) -> Result<T, String>) -> Result<T> {
    loop {
        let raw: String = Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(message) => println!("{}", message.red()),
        }
    }
}

/// Prompt for a replacement value; blank input keeps the current one
pub fn prompt_optional<T>(
    label: &str,
    current: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>> {
    let full = format!("{label} [{current}]");
    loop {
        let raw: String = Input::<String>::new()
            .with_prompt(full.as_str())
            .allow_empty(true)
            .interact_text()?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match parse(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => println!("{}", message.red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims_and_rejects_blank() {
        assert_eq!(non_empty("  S1  "), Ok("S1".to_string()));
        assert!(non_empty("").is_err());
        assert!(non_empty("   ").is_err());
    }

    #[test]
    fn test_int_in_range_bounds() {
        assert_eq!(int_in_range("1", 1, 1000), Ok(1));
        assert_eq!(int_in_range("1000", 1, 1000), Ok(1000));
        assert_eq!(int_in_range(" 500 ", 1, 1000), Ok(500));
        assert!(int_in_range("0", 1, 1000).is_err());
        assert!(int_in_range("1001", 1, 1000).is_err());
        assert!(int_in_range("3.5", 1, 1000).is_err());
        assert!(int_in_range("many", 1, 1000).is_err());
    }

    #[test]
    fn test_positive_decimal() {
        assert_eq!(positive_decimal("19.99"), Ok(19.99));
        assert_eq!(positive_decimal("500"), Ok(500.0));
        assert!(positive_decimal("0").is_err());
        assert!(positive_decimal("-5").is_err());
        assert!(positive_decimal("free").is_err());
    }

    #[test]
    fn test_date_requires_iso_format() {
        assert_eq!(
            date("2024-08-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
        );
        assert!(date("01.08.2024").is_err());
        assert!(date("2024-13-01").is_err());
        assert!(date("soon").is_err());
    }

    #[test]
    fn test_yes_no_forms() {
        assert_eq!(yes_no("yes"), Ok(true));
        assert_eq!(yes_no("Y"), Ok(true));
        assert_eq!(yes_no("No"), Ok(false));
        assert_eq!(yes_no("n"), Ok(false));
        assert!(yes_no("da").is_err());
    }
}
