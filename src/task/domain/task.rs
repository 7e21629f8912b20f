//! Task aggregate root and its guarded lifecycle methods.

use super::{
    EstimatedHours, TaskDescription, TaskDomainError, TaskId, TaskNotes, TaskPriority, TaskStatus,
    TaskTitle,
};
use crate::directory::domain::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameter object for constructing a new task.
///
/// Carries pre-validated field values; the aggregate constructor itself is
/// infallible and always starts the task at [`TaskStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Validated description.
    pub description: TaskDescription,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Optional effort estimate.
    pub estimated_hours: Option<EstimatedHours>,
    /// Optional caller-supplied notes.
    pub notes: Option<TaskNotes>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Verified assignee identifiers.
    pub assignee_ids: BTreeSet<UserId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted start timestamp, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted effort estimate, if any.
    pub estimated_hours: Option<EstimatedHours>,
    /// Persisted notes, if any.
    pub notes: Option<TaskNotes>,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted raw assignment links.
    pub assignee_ids: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// The assignee set holds raw user identifiers: the assignment relation
/// itself. Whether those users are currently visible or eligible is a
/// directory concern resolved at read or assignment time, never stored
/// back into the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    estimated_hours: Option<EstimatedHours>,
    notes: Option<TaskNotes>,
    project_id: ProjectId,
    assignee_ids: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Pending`].
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority,
            due_date: data.due_date,
            started_at: None,
            completed_at: None,
            estimated_hours: data.estimated_hours,
            notes: data.notes,
            project_id: data.project_id,
            assignee_ids: data.assignee_ids,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            started_at: data.started_at,
            completed_at: data.completed_at,
            estimated_hours: data.estimated_hours,
            notes: data.notes,
            project_id: data.project_id,
            assignee_ids: data.assignee_ids,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns when work started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task completed.
    ///
    /// `Some` exactly when the status is [`TaskStatus::Completed`]; every
    /// mutation path maintains this invariant.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the effort estimate, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<EstimatedHours> {
        self.estimated_hours
    }

    /// Returns the notes, if any.
    #[must_use]
    pub const fn notes(&self) -> Option<&TaskNotes> {
        self.notes.as_ref()
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the raw assignment links.
    ///
    /// Identifiers of users who were active when assigned; some may have
    /// been deactivated or deleted in the directory since. History is not
    /// retroactively rewritten here.
    #[must_use]
    pub const fn assignee_ids(&self) -> &BTreeSet<UserId> {
        &self.assignee_ids
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Starts work on the task.
    ///
    /// Allowed from [`TaskStatus::Pending`] or [`TaskStatus::Blocked`];
    /// records the start time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] from any other
    /// status, leaving the task unchanged.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !matches!(self.status, TaskStatus::Pending | TaskStatus::Blocked) {
            return Err(self.transition_error(TaskStatus::InProgress));
        }
        let timestamp = clock.utc();
        self.status = TaskStatus::InProgress;
        self.started_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Completes the task.
    ///
    /// Allowed only from [`TaskStatus::InProgress`]; records the
    /// completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] from any other
    /// status, leaving the task unchanged.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::InProgress {
            return Err(self.transition_error(TaskStatus::Completed));
        }
        let timestamp = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Blocks the task, appending a timestamped reason line to the notes.
    ///
    /// Allowed from any non-terminal status, including `Blocked` itself
    /// (each call appends another reason line; prior notes are never
    /// overwritten).
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] from a terminal
    /// status, leaving the task unchanged.
    pub fn block(&mut self, reason: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(self.transition_error(TaskStatus::Blocked));
        }
        let timestamp = clock.utc();
        let line = format!(
            "[{}] blocked: {reason}",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        self.notes = Some(match self.notes.take() {
            Some(notes) => notes.with_appended_line(&line),
            None => TaskNotes::from_audit_line(line),
        });
        self.status = TaskStatus::Blocked;
        self.updated_at = timestamp;
        Ok(())
    }

    /// Cancels the task.
    ///
    /// Allowed from every status except [`TaskStatus::Completed`];
    /// cancelling an already-cancelled task succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] from
    /// `Completed`, leaving the task unchanged.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Completed {
            return Err(self.transition_error(TaskStatus::Cancelled));
        }
        self.status = TaskStatus::Cancelled;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the status directly, without workflow preconditions.
    ///
    /// This is the administrative path used by partial updates. It upholds
    /// only the completion-timestamp invariant: entering `Completed` from
    /// elsewhere records the time, leaving `Completed` clears it, and
    /// re-assigning `Completed` preserves the original timestamp. The
    /// guarded methods above remain the only path that enforces transition
    /// legality.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        if status == TaskStatus::Completed {
            if self.status != TaskStatus::Completed {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
        self.status = status;
        self.touch(clock);
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: TaskDescription, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the due date.
    pub fn set_due_date(&mut self, due_date: DateTime<Utc>, clock: &impl Clock) {
        self.due_date = due_date;
        self.touch(clock);
    }

    /// Replaces the effort estimate.
    pub fn set_estimated_hours(&mut self, estimated_hours: EstimatedHours, clock: &impl Clock) {
        self.estimated_hours = Some(estimated_hours);
        self.touch(clock);
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: TaskNotes, clock: &impl Clock) {
        self.notes = Some(notes);
        self.touch(clock);
    }

    /// Moves the task to another project.
    ///
    /// The caller is responsible for gating on project activity first.
    pub fn set_project(&mut self, project_id: ProjectId, clock: &impl Clock) {
        self.project_id = project_id;
        self.touch(clock);
    }

    /// Replaces the assignee set wholesale.
    ///
    /// An empty iterator unassigns everyone. The caller is responsible for
    /// having verified the users first.
    pub fn replace_assignees(
        &mut self,
        assignee_ids: impl IntoIterator<Item = UserId>,
        clock: &impl Clock,
    ) {
        self.assignee_ids = assignee_ids.into_iter().collect();
        self.touch(clock);
    }

    /// Returns whether the task is past due and still open.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        !self.status.is_terminal() && self.due_date < clock.utc()
    }

    /// Returns the signed number of whole hours until the due date.
    ///
    /// Negative once the due date has passed.
    #[must_use]
    pub fn hours_until_due(&self, clock: &impl Clock) -> i64 {
        (self.due_date - clock.utc()).num_hours()
    }

    const fn transition_error(&self, attempted: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStatusTransition {
            task_id: self.id,
            from: self.status,
            attempted,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
