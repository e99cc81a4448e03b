//! Shared validation utilities
//!
//! Payload types implement [`Validate`] to turn a raw, all-optional request
//! body into a checked domain value. Violations are collected per field in
//! [`ValidationErrors`] so one response can report every bad field at once.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crm_server::features::shared::validation::{validate_max_chars, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! if !validate_max_chars("Ada", 100) {
//!     errors.add("name", "Name must not exceed 100 characters");
//! }
//! errors.into_result()?;
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> message, ordered by field name for stable responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a violation. The first message reported for a field is kept.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// A request payload that can be checked into a domain value.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, ValidationErrors>;
}

/// True when `value` has at most `max` characters (Unicode scalar values).
pub fn validate_max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True when `value` has no NUL character. Postgres TEXT cannot hold one.
pub fn validate_no_nul(value: &str) -> bool {
    !value.contains('\0')
}

/// Parse a strict `yyyy-MM-dd` calendar date.
///
/// Rejects anything that is not exactly four digits, dash, two digits, dash,
/// two digits, and any impossible date such as `2023-02-30`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Date-of-birth rule evaluated against `today`.
///
/// `None` passes; presence is checked separately. A present value must be a
/// strict ISO date that is not after `today`.
pub fn validate_date_of_birth(value: Option<&str>, today: NaiveDate) -> bool {
    match value {
        None => true,
        Some(raw) => parse_iso_date(raw).is_some_and(|date| date <= today),
    }
}

/// Today's date in the server's local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name cannot be null");
        errors.add("name", "Name must not exceed 100 characters");
        errors.add("age", "Age cannot be null");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name cannot be null"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["age", "name"]);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("age", "bad").into_result().is_err());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = ValidationErrors::single("request", "Malformed JSON request");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "request": "Malformed JSON request" }));
    }

    #[test]
    fn test_max_chars_counts_characters_not_bytes() {
        assert!(validate_max_chars(&"é".repeat(100), 100));
        assert!(!validate_max_chars(&"a".repeat(101), 100));
        assert!(validate_max_chars("", 0));
    }

    #[test]
    fn test_no_nul() {
        assert!(validate_no_nul("John Smith"));
        assert!(validate_no_nul(""));
        assert!(!validate_no_nul("a\0b"));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("1993-01-01"), Some(date(1993, 1, 1)));
        assert_eq!(parse_iso_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_iso_date("2023-02-30"), None);
        assert_eq!(parse_iso_date("2023-2-3"), None);
        assert_eq!(parse_iso_date("01/01/1993"), None);
        assert_eq!(parse_iso_date("1993-01-01T00:00"), None);
        assert_eq!(parse_iso_date("+993-01-01"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_date_of_birth_boundaries() {
        let today = date(2024, 6, 15);

        assert!(validate_date_of_birth(None, today));
        assert!(validate_date_of_birth(Some("2024-06-15"), today));
        assert!(validate_date_of_birth(Some("1900-01-01"), today));
        assert!(!validate_date_of_birth(Some("2024-06-16"), today));
        assert!(!validate_date_of_birth(Some("2023-02-30"), today));
        assert!(!validate_date_of_birth(Some("   "), today));
        assert!(!validate_date_of_birth(Some("not-a-date"), today));
    }

    #[test]
    fn test_date_of_birth_against_local_clock() {
        let today = local_today();
        let tomorrow = today.succ_opt().unwrap();

        assert!(validate_date_of_birth(Some(&today.format("%Y-%m-%d").to_string()), today));
        assert!(!validate_date_of_birth(Some(&tomorrow.format("%Y-%m-%d").to_string()), today));
    }
}
