//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating caller-supplied task fields.
///
/// Every variant is detectable from the input alone, before any directory
/// or store lookup runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title length is out of bounds after trimming.
    #[error("task title must be between 3 and 255 characters (got {actual})")]
    TitleLength {
        /// Character count of the rejected title.
        actual: usize,
    },

    /// The description length is out of bounds after trimming.
    #[error("task description must be between 10 and 2000 characters (got {actual})")]
    DescriptionLength {
        /// Character count of the rejected description.
        actual: usize,
    },

    /// The estimated hours value exceeds the allowed range.
    #[error("estimated hours must be between 0 and 999 (got {actual})")]
    EstimatedHoursOutOfRange {
        /// The rejected value.
        actual: u16,
    },

    /// The notes text exceeds the caller-input cap.
    #[error("notes must not exceed 1000 characters (got {actual})")]
    NotesTooLong {
        /// Character count of the rejected notes.
        actual: usize,
    },

    /// The due date supplied at creation time is already past.
    #[error("due date {due_date} must not be in the past")]
    DueDateInPast {
        /// The rejected due date.
        due_date: DateTime<Utc>,
    },

    /// The block reason is empty after trimming.
    #[error("block reason must not be empty")]
    EmptyBlockReason,
}

/// Errors returned by guarded task lifecycle methods.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested workflow transition is not enabled from the current
    /// status.
    #[error("task {task_id} cannot move from {from} to {attempted}")]
    InvalidStatusTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskStatus,
        /// Status the caller attempted to reach.
        attempted: TaskStatus,
    },
}

/// Error returned while parsing task statuses from their wire names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from their wire names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
