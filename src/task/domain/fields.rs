//! Validated scalar field types for tasks.

use super::TaskValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task title, 3 to 255 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Minimum title length in characters.
    pub const MIN_CHARS: usize = 3;
    /// Maximum title length in characters.
    pub const MAX_CHARS: usize = 255;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::TitleLength`] when the trimmed value
    /// is outside the allowed bounds.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let normalized = raw.trim();
        let actual = normalized.chars().count();
        if actual < Self::MIN_CHARS || actual > Self::MAX_CHARS {
            return Err(TaskValidationError::TitleLength { actual });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task description, 10 to 2000 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Minimum description length in characters.
    pub const MIN_CHARS: usize = 10;
    /// Maximum description length in characters.
    pub const MAX_CHARS: usize = 2000;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DescriptionLength`] when the trimmed
    /// value is outside the allowed bounds.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let normalized = raw.trim();
        let actual = normalized.chars().count();
        if actual < Self::MIN_CHARS || actual > Self::MAX_CHARS {
            return Err(TaskValidationError::DescriptionLength { actual });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Effort estimate in whole hours, capped at 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedHours(u16);

impl EstimatedHours {
    /// Largest accepted estimate.
    pub const MAX_HOURS: u16 = 999;

    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EstimatedHoursOutOfRange`] when the
    /// value exceeds [`Self::MAX_HOURS`].
    pub const fn new(value: u16) -> Result<Self, TaskValidationError> {
        if value > Self::MAX_HOURS {
            return Err(TaskValidationError::EstimatedHoursOutOfRange { actual: value });
        }
        Ok(Self(value))
    }

    /// Returns the estimate in hours.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for EstimatedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text notes attached to a task.
///
/// Caller-supplied notes are capped at 1000 characters. Audit lines the
/// lifecycle appends (blocked reasons) are exempt from the cap so a long
/// note history can never make `block` fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNotes(String);

impl TaskNotes {
    /// Maximum caller-supplied notes length in characters.
    pub const MAX_CHARS: usize = 1000;

    /// Creates validated notes from caller input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::NotesTooLong`] when the value exceeds
    /// [`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let actual = raw.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskValidationError::NotesTooLong { actual });
        }
        Ok(Self(raw))
    }

    /// Creates notes from a lifecycle audit line, bypassing the caller cap.
    #[must_use]
    pub const fn from_audit_line(line: String) -> Self {
        Self(line)
    }

    /// Returns new notes with `line` appended on its own line.
    #[must_use]
    pub fn with_appended_line(self, line: &str) -> Self {
        if self.0.is_empty() {
            Self(line.to_owned())
        } else {
            Self(format!("{}\n{line}", self.0))
        }
    }

    /// Returns the notes as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskNotes {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validates that a creation-time due date is not already past.
///
/// Updates are exempt: an existing task may legitimately be rescheduled
/// into the past (it simply becomes overdue).
///
/// # Errors
///
/// Returns [`TaskValidationError::DueDateInPast`] when `due_date` is
/// earlier than `now`.
pub fn validate_creation_due_date(
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), TaskValidationError> {
    if due_date < now {
        return Err(TaskValidationError::DueDateInPast { due_date });
    }
    Ok(())
}
