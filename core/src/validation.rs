use chrono::{DateTime, NaiveDate};

use crate::{
    error::{Result, StoreError},
    models::{TaskPayload, UserDescriptor},
};

/// Validation utilities for write payloads.
///
/// Validation runs before a transaction is opened, so a rejected payload
/// never touches the store. Skill values are deliberately not validated
/// here; the schema owns the non-blank constraint on them.
pub struct PayloadValidator;

impl PayloadValidator {
    /// Validate a user descriptor.
    ///
    /// # Returns
    /// * `Ok(())` - If the descriptor is valid
    /// * `Err(StoreError::Validation)` - If the name is blank or the age
    ///   is negative
    pub fn validate_user(user: &UserDescriptor) -> Result<()> {
        if user.name.trim().is_empty() {
            return Err(StoreError::empty_field("name"));
        }
        if user.age < 0 {
            return Err(StoreError::Validation(
                "Field 'age' cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a task payload, including every inline user descriptor.
    ///
    /// The date string is checked for parseability here; the normalized
    /// value itself comes from [`normalize_task_date`].
    pub fn validate_task(task: &TaskPayload) -> Result<()> {
        if task.title.trim().is_empty() {
            return Err(StoreError::empty_field("title"));
        }
        normalize_task_date(&task.date)?;
        for user in &task.users {
            Self::validate_user(user)?;
        }
        Ok(())
    }
}

/// Normalize a task date string to a calendar date with no time component.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, in which
/// case the time-of-day is dropped. The result is locale-independent and
/// stable across writes.
pub fn normalize_task_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    Err(StoreError::invalid_date(value))
}
