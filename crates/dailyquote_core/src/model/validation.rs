//! Input hardening applied at the handler boundary.
//!
//! # Invariants
//! - Validation never rewrites accepted values; stored text equals input text.
//! - Dates are accepted only in canonical `YYYY-MM-DD` form.

use crate::model::diary::ENTRY_DATE_FORMAT;
use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted length of a category label, in characters.
pub const MAX_CATEGORY_CHARS: usize = 64;
/// Maximum accepted length of diary content, in characters.
pub const MAX_DIARY_CONTENT_CHARS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValidationError {
    InvalidDate { value: String },
    BlankField { field: &'static str },
    TooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    ControlCharacter { field: &'static str },
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value } => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::BlankField { field } => write!(f, "{field} cannot be blank"),
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field} is too long: {actual_chars} characters (max {max_chars})"
            ),
            Self::ControlCharacter { field } => {
                write!(f, "{field} contains unsupported control characters")
            }
        }
    }
}

impl Error for InputValidationError {}

/// Parses a calendar date in ISO-8601 `YYYY-MM-DD` form.
pub fn parse_entry_date(value: &str) -> Result<NaiveDate, InputValidationError> {
    let trimmed = value.trim();
    let invalid = || InputValidationError::InvalidDate {
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(trimmed, ENTRY_DATE_FORMAT).map_err(|_| invalid())?;
    // chrono accepts unpadded fields; only the canonical rendering round-trips.
    if date.year() < 1 || date.format(ENTRY_DATE_FORMAT).to_string() != trimmed {
        return Err(invalid());
    }
    Ok(date)
}

/// Validates a required category label.
pub fn validate_category(
    field: &'static str,
    value: &str,
) -> Result<(), InputValidationError> {
    if value.trim().is_empty() {
        return Err(InputValidationError::BlankField { field });
    }
    check_length(field, value, MAX_CATEGORY_CHARS)?;
    if value.chars().any(char::is_control) {
        return Err(InputValidationError::ControlCharacter { field });
    }
    Ok(())
}

/// Treats a blank optional category as "no filter", otherwise validates it.
pub fn normalize_optional_category(
    value: Option<&str>,
) -> Result<Option<&str>, InputValidationError> {
    match value {
        Some(category) if !category.trim().is_empty() => {
            validate_category("category", category)?;
            Ok(Some(category))
        }
        _ => Ok(None),
    }
}

/// Validates free-text diary content. Empty content is accepted.
pub fn validate_diary_content(value: &str) -> Result<(), InputValidationError> {
    const FIELD: &str = "content";
    check_length(FIELD, value, MAX_DIARY_CONTENT_CHARS)?;
    if value
        .chars()
        .any(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
    {
        return Err(InputValidationError::ControlCharacter { field: FIELD });
    }
    Ok(())
}

fn check_length(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), InputValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(InputValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_optional_category, parse_entry_date, validate_category,
        validate_diary_content, InputValidationError, MAX_CATEGORY_CHARS,
    };
    use chrono::NaiveDate;

    #[test]
    fn parse_entry_date_accepts_canonical_form() {
        assert_eq!(
            parse_entry_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn parse_entry_date_rejects_malformed_values() {
        for value in ["2024-1-5", "2023-02-29", "05/01/2024", "", "2024-01-05T10:00:00"] {
            let err = parse_entry_date(value).unwrap_err();
            assert!(
                matches!(err, InputValidationError::InvalidDate { .. }),
                "{value}"
            );
        }
    }

    #[test]
    fn category_rules() {
        assert!(validate_category("category", "Wisdom").is_ok());
        assert_eq!(
            validate_category("category", "  ").unwrap_err(),
            InputValidationError::BlankField { field: "category" }
        );
        let long = "x".repeat(MAX_CATEGORY_CHARS + 1);
        assert!(matches!(
            validate_category("category", &long).unwrap_err(),
            InputValidationError::TooLong { .. }
        ));
        assert!(matches!(
            validate_category("category", "a\u{0}b").unwrap_err(),
            InputValidationError::ControlCharacter { .. }
        ));
    }

    #[test]
    fn blank_optional_category_means_no_filter() {
        assert_eq!(normalize_optional_category(None).unwrap(), None);
        assert_eq!(normalize_optional_category(Some(" ")).unwrap(), None);
        assert_eq!(
            normalize_optional_category(Some("Life")).unwrap(),
            Some("Life")
        );
    }

    #[test]
    fn diary_content_allows_line_breaks_only() {
        assert!(validate_diary_content("").is_ok());
        assert!(validate_diary_content("line one\nline two\tend").is_ok());
        assert!(validate_diary_content("bell\u{7}").is_err());
    }
}
