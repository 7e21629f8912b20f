//! Orchestration service for task create, read, update, and delete.

use crate::directory::{
    domain::{Project, ProjectId, User, UserId},
    ports::{DirectoryError, ProjectDirectory, UserDirectory},
};
use crate::task::{
    domain::{
        validate_creation_due_date, EstimatedHours, NewTaskData, Task, TaskDescription,
        TaskDomainError, TaskId, TaskNotes, TaskPriority, TaskStatus, TaskTitle,
        TaskValidationError, TaskWithAssignees,
    },
    ports::{TaskStore, TaskStoreError},
    services::assignment::{AssignmentError, AssignmentResolver},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// There is deliberately no status field: every task starts at
/// [`TaskStatus::Pending`] no matter what the caller intended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    estimated_hours: Option<u16>,
    notes: Option<String>,
    assignee_ids: Vec<UserId>,
    project_id: ProjectId,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields. Priority defaults to
    /// [`TaskPriority::Medium`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
        project_id: ProjectId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: TaskPriority::default(),
            due_date,
            estimated_hours: None,
            notes: None,
            assignee_ids: Vec::new(),
            project_id,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the effort estimate in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u16) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the candidate assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignee_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = assignee_ids.into_iter().collect();
        self
    }
}

/// Partial-update payload: every field is independently optional.
///
/// An omitted field leaves the task untouched. A supplied assignee list
/// fully replaces the current set; supplying an empty list unassigns
/// everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
    estimated_hours: Option<u16>,
    notes: Option<String>,
    status: Option<TaskStatus>,
    project_id: Option<ProjectId>,
    assignee_ids: Option<Vec<UserId>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Overwrites the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overwrites the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Overwrites the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Overwrites the effort estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u16) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Overwrites the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Assigns the status directly (administrative path; see
    /// [`Task::set_status`]).
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Replaces the assignee set. Pass an empty iterator to unassign all.
    #[must_use]
    pub fn with_assignees(mut self, assignee_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = Some(assignee_ids.into_iter().collect());
        self
    }
}

/// Service-level errors for task orchestration.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Malformed input, detected before any lookup.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The project does not exist or is not active; the two cases are
    /// indistinguishable by design.
    #[error("project not found or not active: {0}")]
    ProjectNotFound(ProjectId),

    /// Assignee resolution rejected one or more candidates.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// A guarded lifecycle method refused the transition.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task store failure.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Directory lookup failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Coarse classification of a [`TaskServiceError`] for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskServiceErrorKind {
    /// Caller-correctable malformed input.
    Validation,
    /// Nothing to operate on: missing task, missing users, or a project
    /// that is absent or archived.
    NotFound,
    /// Entities exist but a domain rule forbids the operation.
    BusinessRule,
    /// A collaborator (store or directory) failed.
    Infrastructure,
}

impl TaskServiceError {
    /// Classifies the error for the transport layer.
    ///
    /// A mixed assignment rejection (missing and inactive candidates in
    /// one failure) classifies as `NotFound`: the missing users dominate,
    /// and the full inactive list still travels in the error detail.
    #[must_use]
    pub fn kind(&self) -> TaskServiceErrorKind {
        match self {
            Self::Validation(_) => TaskServiceErrorKind::Validation,
            Self::TaskNotFound(_) | Self::ProjectNotFound(_) => TaskServiceErrorKind::NotFound,
            Self::Assignment(AssignmentError::RejectedAssignees { missing, .. }) => {
                if missing.is_empty() {
                    TaskServiceErrorKind::BusinessRule
                } else {
                    TaskServiceErrorKind::NotFound
                }
            }
            Self::Domain(_) => TaskServiceErrorKind::BusinessRule,
            Self::Assignment(AssignmentError::Directory(_))
            | Self::Store(_)
            | Self::Directory(_) => TaskServiceErrorKind::Infrastructure,
        }
    }
}

/// Result type for task orchestration operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Each public operation is one request-scoped unit of work with strict
/// read-validate-then-write ordering: a failed validation never leaves a
/// partial write. Concurrent updates of the same task are not serialized;
/// the later save wins wholesale (a known limitation carried from the
/// storage contract, not hidden behind locking).
#[derive(Clone)]
pub struct TaskService<S, U, P, C>
where
    S: TaskStore,
    U: UserDirectory,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    projects: Arc<P>,
    resolver: AssignmentResolver<U>,
    clock: Arc<C>,
}

impl<S, U, P, C> TaskService<S, U, P, C>
where
    S: TaskStore,
    U: UserDirectory,
    P: ProjectDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task orchestration service.
    #[must_use]
    pub fn new(store: Arc<S>, users: Arc<U>, projects: Arc<P>, clock: Arc<C>) -> Self {
        let resolver = AssignmentResolver::new(Arc::clone(&users));
        Self {
            store,
            users,
            projects,
            resolver,
            clock,
        }
    }

    /// Creates a task.
    ///
    /// Field validation runs before any lookup; assignees and the project
    /// are verified before anything is written. The response is re-read
    /// through the consistency-safe path so it reflects exactly what a
    /// subsequent [`Self::get_task`] would return.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] on malformed fields, unknown or
    /// inactive assignees, an unplaceable project, or collaborator
    /// failure.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskWithAssignees> {
        let now = self.clock.utc();
        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::new(request.description)?;
        let estimated_hours = request
            .estimated_hours
            .map(EstimatedHours::new)
            .transpose()?;
        let notes = request.notes.map(TaskNotes::new).transpose()?;
        validate_creation_due_date(request.due_date, now)?;

        let assignees = self.resolver.resolve(&request.assignee_ids).await?;
        let project = self.require_active_project(request.project_id).await?;

        let task = Task::new(
            NewTaskData {
                title,
                description,
                priority: request.priority,
                due_date: request.due_date,
                estimated_hours,
                notes,
                project_id: project.id(),
                assignee_ids: assignees.iter().map(User::id).collect(),
            },
            &*self.clock,
        );
        self.store.save(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %project.id(),
            assignees = assignees.len(),
            "task created"
        );
        self.load_with_assignees(task.id()).await
    }

    /// Retrieves a task with its directory-visible assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task row itself
    /// is absent, or a collaborator failure.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<TaskWithAssignees> {
        self.load_with_assignees(id).await
    }

    /// Applies a partial update.
    ///
    /// Supplied fields overwrite independently; omitted fields stay
    /// untouched. A supplied assignee list fully replaces the current set
    /// after re-validation. A supplied project is re-gated only when it
    /// differs from the current one. A supplied status goes through the
    /// administrative assignment path, which upholds the
    /// completion-timestamp invariant but not workflow legality.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the task is absent, a supplied
    /// field is malformed, assignees or project fail re-validation, or a
    /// collaborator fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskWithAssignees> {
        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        // Malformed input fails before any directory lookup or mutation.
        let new_title = request.title.map(TaskTitle::new).transpose()?;
        let new_description = request.description.map(TaskDescription::new).transpose()?;
        let new_estimated_hours = request
            .estimated_hours
            .map(EstimatedHours::new)
            .transpose()?;
        let new_notes = request.notes.map(TaskNotes::new).transpose()?;

        let resolved = match request.assignee_ids {
            Some(candidate_ids) => Some(self.resolver.resolve(&candidate_ids).await?),
            None => None,
        };
        if let Some(project_id) = request.project_id {
            if project_id != task.project_id() {
                self.require_active_project(project_id).await?;
                task.set_project(project_id, &*self.clock);
            }
        }

        let clock = &*self.clock;
        if let Some(value) = new_title {
            task.set_title(value, clock);
        }
        if let Some(value) = new_description {
            task.set_description(value, clock);
        }
        if let Some(value) = request.priority {
            task.set_priority(value, clock);
        }
        if let Some(value) = request.due_date {
            task.set_due_date(value, clock);
        }
        if let Some(value) = new_estimated_hours {
            task.set_estimated_hours(value, clock);
        }
        if let Some(value) = new_notes {
            task.set_notes(value, clock);
        }
        if let Some(value) = request.status {
            task.set_status(value, clock);
        }
        if let Some(users) = &resolved {
            task.replace_assignees(users.iter().map(User::id), clock);
        }

        self.store.save(&task).await?;
        tracing::debug!(task_id = %id, "task updated");

        // The mutation already holds correct, unfiltered in-memory state;
        // resolver output is used directly instead of re-querying.
        let assignees = match resolved {
            Some(users) => users,
            None => self.materialize_assignees(&task).await?,
        };
        Ok(TaskWithAssignees::assemble(task, assignees))
    }

    /// Hard-deletes a task with its assignment links and owned child
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// or a store failure.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        self.store.delete(&task).await?;
        tracing::info!(task_id = %id, "task hard-deleted");
        Ok(())
    }

    /// Starts work on a task (guarded; see [`Task::start`]).
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// [`TaskServiceError::Domain`] when the transition is not enabled, or
    /// a collaborator failure.
    pub async fn start_task(&self, id: TaskId) -> TaskServiceResult<TaskWithAssignees> {
        self.apply_workflow(id, |task, clock| task.start(clock))
            .await
    }

    /// Completes a task (guarded; see [`Task::complete`]).
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// [`TaskServiceError::Domain`] when the transition is not enabled, or
    /// a collaborator failure.
    pub async fn complete_task(&self, id: TaskId) -> TaskServiceResult<TaskWithAssignees> {
        self.apply_workflow(id, |task, clock| task.complete(clock))
            .await
    }

    /// Blocks a task, appending a timestamped reason to its notes
    /// (guarded; see [`Task::block`]).
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the reason is blank,
    /// [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// [`TaskServiceError::Domain`] when the task is in a terminal status,
    /// or a collaborator failure.
    pub async fn block_task(
        &self,
        id: TaskId,
        reason: &str,
    ) -> TaskServiceResult<TaskWithAssignees> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyBlockReason.into());
        }
        self.apply_workflow(id, |task, clock| task.block(trimmed, clock))
            .await
    }

    /// Cancels a task (guarded; see [`Task::cancel`]).
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// [`TaskServiceError::Domain`] when the task is completed, or a
    /// collaborator failure.
    pub async fn cancel_task(&self, id: TaskId) -> TaskServiceResult<TaskWithAssignees> {
        self.apply_workflow(id, |task, clock| task.cancel(clock))
            .await
    }

    /// Loads a task and composes its assignee collection in two steps.
    ///
    /// The aggregate comes from the store with its raw assignment links
    /// and touches no user records; the linked users are then fetched
    /// through the directory's default (deleted-excluding) listing and the
    /// two are composed in memory. Keeping the soft-delete scope out of
    /// the link-loading step is what lets deleted assignees drop out of
    /// the materialized collection without ever emptying it for the
    /// active ones.
    async fn load_with_assignees(&self, id: TaskId) -> TaskServiceResult<TaskWithAssignees> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let assignees = self.materialize_assignees(&task).await?;
        Ok(TaskWithAssignees::assemble(task, assignees))
    }

    /// Fetches the task's linked users through the directory's default
    /// listing.
    async fn materialize_assignees(&self, task: &Task) -> TaskServiceResult<Vec<User>> {
        let linked: Vec<UserId> = task.assignee_ids().iter().copied().collect();
        if linked.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.users.find_all_by_id(&linked).await?)
    }

    /// Loads, mutates through a guarded lifecycle method, persists, and
    /// returns the read model.
    async fn apply_workflow<F>(&self, id: TaskId, mutate: F) -> TaskServiceResult<TaskWithAssignees>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError>,
    {
        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let previous_status = task.status();
        mutate(&mut task, self.clock.as_ref())?;
        self.store.save(&task).await?;
        tracing::info!(
            task_id = %id,
            from = %previous_status,
            to = %task.status(),
            "task status changed"
        );
        let assignees = self.materialize_assignees(&task).await?;
        Ok(TaskWithAssignees::assemble(task, assignees))
    }

    /// Confirms the project is placeable.
    ///
    /// A project that exists but is archived produces the same error as a
    /// nonexistent one; neither can take tasks.
    async fn require_active_project(&self, id: ProjectId) -> TaskServiceResult<Project> {
        self.projects
            .find_active_by_id(id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(id))
    }
}
