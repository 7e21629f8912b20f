//! Lookup ports for the user and project directories.

use crate::directory::domain::{Project, ProjectId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookup operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// User directory lookup contract.
///
/// The default listing applies the directory's soft-delete scope: a deleted
/// user is simply absent from results, exactly as if the identifier never
/// existed. Inactive users are returned by both listings.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the users matching `ids`, excluding deleted users.
    ///
    /// Unknown identifiers are silently absent from the result; callers
    /// detect them by comparing counts.
    async fn find_all_by_id(&self, ids: &[UserId]) -> DirectoryResult<Vec<User>>;

    /// Returns the users matching `ids` regardless of the deleted flag.
    ///
    /// Bypasses the soft-delete scope. Used when reconciling historical
    /// assignment links against directory state, never for eligibility
    /// checks.
    async fn find_all_by_id_unfiltered(&self, ids: &[UserId]) -> DirectoryResult<Vec<User>>;
}

/// Project directory lookup contract.
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Returns the project only when it exists and is active.
    ///
    /// An archived project yields `None`, indistinguishable from a missing
    /// one.
    async fn find_active_by_id(&self, id: ProjectId) -> DirectoryResult<Option<Project>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory backend could not be reached or answered abnormally.
    #[error("directory lookup failed: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
