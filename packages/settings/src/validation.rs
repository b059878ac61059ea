// ABOUTME: Input validation for user settings
// ABOUTME: Bounded numeric rules checked before any settings write

use thiserror::Error;

use crate::defaults::{MAX_FOLLOW_UP_DAYS, MIN_FOLLOW_UP_DAYS};
use crate::types::{JobSearchSettings, UserSettings};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid integer value for {0}: {1}. {2}")]
    InvalidInteger(String, String, String),
}

/// Validate a settings value before it is written.
///
/// Profile, salary and timezone values are free-form strings and are stored
/// as entered.
pub fn validate_settings(settings: &UserSettings) -> Result<(), ValidationError> {
    validate_job_search(&settings.job_search)
}

pub fn validate_job_search(job_search: &JobSearchSettings) -> Result<(), ValidationError> {
    validate_integer(
        "followUpDays",
        i64::from(job_search.follow_up_days),
        Some(i64::from(MIN_FOLLOW_UP_DAYS)),
        Some(i64::from(MAX_FOLLOW_UP_DAYS)),
    )
}

/// Validate integer value with optional min/max bounds
fn validate_integer(
    field: &str,
    value: i64,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<(), ValidationError> {
    if let Some(min_val) = min {
        if value < min_val {
            return Err(ValidationError::InvalidInteger(
                field.to_string(),
                value.to_string(),
                format!("Must be >= {}", min_val),
            ));
        }
    }

    if let Some(max_val) = max {
        if value > max_val {
            return Err(ValidationError::InvalidInteger(
                field.to_string(),
                value.to_string(),
                format!("Must be <= {}", max_val),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&UserSettings::default()).is_ok());
    }

    #[test]
    fn test_validate_integer_with_bounds() {
        assert!(validate_integer("followUpDays", 1, Some(1), Some(30)).is_ok());
        assert!(validate_integer("followUpDays", 30, Some(1), Some(30)).is_ok());
        assert!(validate_integer("followUpDays", 0, Some(1), Some(30)).is_err());
        assert!(validate_integer("followUpDays", 31, Some(1), Some(30)).is_err());
        assert!(validate_integer("followUpDays", 500, None, None).is_ok());
    }

    #[rstest]
    #[case("linkedIn", "linkedin.com/in/jane")]
    #[case("phone", "555.123.4567")]
    #[case("salary", "90k")]
    #[case("timezone", "EST")]
    fn test_free_form_strings_are_accepted(#[case] field: &str, #[case] value: &str) {
        let mut settings = UserSettings::default();
        match field {
            "linkedIn" => settings.profile.linked_in = value.to_string(),
            "phone" => settings.profile.phone = value.to_string(),
            "salary" => settings.job_search.salary = value.to_string(),
            _ => settings.job_search.timezone = value.to_string(),
        }

        assert!(validate_settings(&settings).is_ok(), "{} {:?}", field, value);
    }

    #[test]
    fn test_validate_settings_rejects_out_of_range_follow_up() {
        let mut settings = UserSettings::default();
        settings.job_search.follow_up_days = 45;

        let err = validate_settings(&settings).unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidInteger(
                "followUpDays".to_string(),
                "45".to_string(),
                "Must be <= 30".to_string()
            )
        );
    }
}
