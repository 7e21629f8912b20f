//! Project read model.

use super::ProjectId;
use serde::{Deserialize, Serialize};

/// Directory project record.
///
/// Only active projects accept new task placements; an archived project is
/// indistinguishable from a missing one at the lookup boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    active: bool,
}

impl Project {
    /// Creates a project record as reported by the directory.
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            active,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the project currently accepts task placements.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}
