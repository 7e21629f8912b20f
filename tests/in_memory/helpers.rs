//! Shared test helpers for in-memory engine integration tests.

use chrono::Duration;
use foreman::directory::{
    adapters::memory::{InMemoryProjectDirectory, InMemoryUserDirectory},
    domain::{Project, ProjectId, User, UserId, Username},
};
use foreman::task::{
    adapters::memory::InMemoryTaskStore,
    services::{CreateTaskRequest, TaskService},
};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use std::sync::Arc;

/// Fully wired service type used across the integration tests.
pub type TestService =
    TaskService<InMemoryTaskStore, InMemoryUserDirectory, InMemoryProjectDirectory, DefaultClock>;

/// In-memory collaborators plus the service under test.
pub struct World {
    /// Task store backing the service.
    pub store: Arc<InMemoryTaskStore>,
    /// User directory backing the service.
    pub users: Arc<InMemoryUserDirectory>,
    /// Project directory backing the service.
    pub projects: Arc<InMemoryProjectDirectory>,
    /// Service under test.
    pub service: TestService,
}

/// Builds a user record for seeding.
///
/// # Errors
///
/// Returns an error when the username fails validation.
pub fn user(id: i64, name: &str, active: bool, deleted: bool) -> Result<User, eyre::Report> {
    Ok(User::new(
        UserId::new(id),
        Username::new(name)?,
        active,
        deleted,
    ))
}

/// Provides a seeded world: users 1 (alice, active), 2 (bob, inactive),
/// 3 (carol, active); projects 1 (active) and 2 (archived).
///
/// # Errors
///
/// Returns an error when seeding fails.
#[fixture]
pub fn world() -> Result<World, eyre::Report> {
    let store = Arc::new(InMemoryTaskStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let projects = Arc::new(InMemoryProjectDirectory::new());

    users.upsert(user(1, "alice", true, false)?)?;
    users.upsert(user(2, "bob", false, false)?)?;
    users.upsert(user(3, "carol", true, false)?)?;
    projects.upsert(Project::new(ProjectId::new(1), "Platform", true))?;
    projects.upsert(Project::new(ProjectId::new(2), "Legacy", false))?;

    let service = TaskService::new(
        Arc::clone(&store),
        Arc::clone(&users),
        Arc::clone(&projects),
        Arc::new(DefaultClock),
    );
    Ok(World {
        store,
        users,
        projects,
        service,
    })
}

/// Builds the canonical "Fix login bug" creation request, due one week
/// out, unassigned, in project 1.
#[must_use]
pub fn login_bug_request() -> CreateTaskRequest {
    CreateTaskRequest::new(
        "Fix login bug",
        "Users cannot sign in with valid credentials",
        DefaultClock.utc() + Duration::weeks(1),
        ProjectId::new(1),
    )
}
