//! In-memory directories for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{Project, ProjectId, User, UserId},
    ports::{DirectoryError, DirectoryResult, ProjectDirectory, UserDirectory},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory user directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] when the backing store is
    /// poisoned.
    pub fn upsert(&self, user: User) -> DirectoryResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| DirectoryError::unavailable(std::io::Error::other(err.to_string())))?;
        users.insert(user.id(), user);
        Ok(())
    }

    fn collect_matching(
        &self,
        ids: &[UserId],
        include_deleted: bool,
    ) -> DirectoryResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|err| DirectoryError::unavailable(std::io::Error::other(err.to_string())))?;
        let mut matched: Vec<User> = ids
            .iter()
            .filter_map(|id| users.get(id))
            .filter(|user| include_deleted || !user.is_deleted())
            .cloned()
            .collect();
        matched.sort_by_key(User::id);
        matched.dedup_by_key(|user| user.id());
        Ok(matched)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_all_by_id(&self, ids: &[UserId]) -> DirectoryResult<Vec<User>> {
        self.collect_matching(ids, false)
    }

    async fn find_all_by_id_unfiltered(&self, ids: &[UserId]) -> DirectoryResult<Vec<User>> {
        self.collect_matching(ids, true)
    }
}

/// Thread-safe in-memory project directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty in-memory project directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a project record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Unavailable`] when the backing store is
    /// poisoned.
    pub fn upsert(&self, project: Project) -> DirectoryResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|err| DirectoryError::unavailable(std::io::Error::other(err.to_string())))?;
        projects.insert(project.id(), project);
        Ok(())
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn find_active_by_id(&self, id: ProjectId) -> DirectoryResult<Option<Project>> {
        let projects = self
            .projects
            .read()
            .map_err(|err| DirectoryError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(projects.get(&id).filter(|project| project.is_active()).cloned())
    }
}
