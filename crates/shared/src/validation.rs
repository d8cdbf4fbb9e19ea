//! Common validation utilities.

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum number of recipients accepted in a single send request.
const MAX_RECIPIENTS: usize = 500;

/// Maximum title length in characters.
const MAX_TITLE_LENGTH: usize = 200;

lazy_static! {
    /// Template names are lowercase identifiers, e.g. `project_assigned`.
    static ref TEMPLATE_NAME_RE: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

/// Validates a time-of-day string in `HH:MM` format.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    match NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut err = ValidationError::new("time_of_day");
            err.message = Some("Time must be in HH:MM format".into());
            Err(err)
        }
    }
}

/// Validates a template name (lowercase, digits, underscores, 1-100 chars).
pub fn validate_template_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.len() > 100 {
        let mut err = ValidationError::new("template_name_length");
        err.message = Some("Template name must be between 1 and 100 characters".into());
        return Err(err);
    }
    if TEMPLATE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        let mut err = ValidationError::new("template_name_format");
        err.message =
            Some("Template name must contain only lowercase letters, digits and underscores".into());
        Err(err)
    }
}

/// Validates a recipient list (non-empty, bounded).
pub fn validate_recipients(recipients: &[i64]) -> Result<(), ValidationError> {
    if recipients.is_empty() {
        let mut err = ValidationError::new("recipients_empty");
        err.message = Some("At least one recipient is required".into());
        return Err(err);
    }
    if recipients.len() > MAX_RECIPIENTS {
        let mut err = ValidationError::new("recipients_limit");
        err.message = Some("Too many recipients in a single request".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a notification title (non-empty after trimming, bounded).
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("title_empty");
        err.message = Some("Title must not be empty".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        let mut err = ValidationError::new("title_length");
        err.message = Some("Title must be at most 200 characters".into());
        return Err(err);
    }
    Ok(())
}
