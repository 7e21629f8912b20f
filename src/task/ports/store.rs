//! Store port for task persistence.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Each call is its own unit of work; implementations commit or roll back
/// the whole call, never part of it.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts the task or overwrites the stored aggregate wholesale,
    /// assignment links included.
    async fn save(&self, task: &Task) -> TaskStoreResult<()>;

    /// Loads the task aggregate with its raw assignment links.
    ///
    /// Touches no user records; whether a linked user is still visible is
    /// a directory question the caller answers separately. Returns `None`
    /// when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Hard-deletes the task: its row, its assignment links, and any owned
    /// child records (comments, attachments) go as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, task: &Task) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found in store: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
