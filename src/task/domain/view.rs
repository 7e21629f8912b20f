//! Read model pairing a task with its materialized assignee collection.

use super::Task;
use crate::directory::domain::User;
use serde::{Deserialize, Serialize};

/// A task together with its assignees as the directory currently sees them.
///
/// The aggregate's raw assignment links and the materialized user records
/// are kept side by side on purpose: links to since-deleted users remain in
/// [`Task::assignee_ids`] while the collection here only holds users the
/// directory's default scope still returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithAssignees {
    task: Task,
    assignees: Vec<User>,
}

impl TaskWithAssignees {
    /// Composes the read model from a loaded aggregate and a directory
    /// fetch. Assignees are ordered by user identifier.
    #[must_use]
    pub fn assemble(task: Task, mut assignees: Vec<User>) -> Self {
        assignees.sort_by_key(User::id);
        Self { task, assignees }
    }

    /// Returns the task aggregate.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the materialized assignees.
    #[must_use]
    pub fn assignees(&self) -> &[User] {
        &self.assignees
    }

    /// Splits the read model into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Task, Vec<User>) {
        (self.task, self.assignees)
    }
}
