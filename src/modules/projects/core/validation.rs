// Input validation performed at the boundary, before any repository call.
//
// Responsibilities
// - Required text fields are non-empty after trimming.
// - Dates are either empty or `YYYY-MM-DD`.
// - Budgets are finite and non-negative.

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("project name is required")]
    EmptyName,

    #[error("task description is required")]
    EmptyTaskDescription,

    #[error("note text is required")]
    EmptyNote,

    #[error("{field} must be a YYYY-MM-DD date, got {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("budget must be a non-negative amount, got {0}")]
    InvalidBudget(f64),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: String, end: String },
}

/// Trimmed non-empty text, or the given error.
pub fn required(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

/// Trimmed date string; empty means unset.
pub fn optional_date(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    parse_date(trimmed).ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })?;
    Ok(trimmed.to_string())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn budget(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidBudget(value));
    }
    Ok(value)
}

pub fn date_range(start: &str, end: &str) -> Result<(), ValidationError> {
    if let (Some(s), Some(e)) = (parse_date(start), parse_date(end)) {
        if e < s {
            return Err(ValidationError::EndBeforeStart {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
    }
    Ok(())
}
