//! Assignee resolution against the user directory.

use crate::directory::{
    domain::{User, UserId, Username},
    ports::{DirectoryError, UserDirectory},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Turns a caller-supplied candidate list into a verified assignee set.
///
/// Candidates are deduplicated, bulk-fetched through the directory's
/// default listing, and checked for existence and activity in one pass.
/// Every offending candidate is reported; a rejection never names only the
/// first problem found.
#[derive(Clone)]
pub struct AssignmentResolver<U> {
    users: Arc<U>,
}

impl<U> AssignmentResolver<U>
where
    U: UserDirectory,
{
    /// Creates a resolver over the given user directory.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Validates and deduplicates `candidate_ids`, returning the verified
    /// users in identifier order.
    ///
    /// An empty candidate list is the valid "unassign" request and
    /// resolves to an empty set. A user the directory does not return
    /// counts as missing (nonexistent and soft-deleted are
    /// indistinguishable here); a returned-but-inactive user counts as
    /// ineligible. Both lists travel in one rejection.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::RejectedAssignees`] naming every missing
    /// identifier and every inactive username, or
    /// [`AssignmentError::Directory`] when the lookup itself fails.
    pub async fn resolve(&self, candidate_ids: &[UserId]) -> Result<Vec<User>, AssignmentError> {
        let distinct: BTreeSet<UserId> = candidate_ids.iter().copied().collect();
        if distinct.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<UserId> = distinct.iter().copied().collect();
        let found = self.users.find_all_by_id(&ids).await?;

        let found_ids: BTreeSet<UserId> = found.iter().map(User::id).collect();
        let missing: Vec<UserId> = distinct.difference(&found_ids).copied().collect();
        let inactive: Vec<Username> = found
            .iter()
            .filter(|user| !user.is_active())
            .map(|user| user.username().clone())
            .collect();

        if !missing.is_empty() || !inactive.is_empty() {
            return Err(AssignmentError::RejectedAssignees { missing, inactive });
        }
        Ok(found)
    }
}

/// Errors returned while resolving assignees.
#[derive(Debug, Clone, Error)]
pub enum AssignmentError {
    /// One or more candidates cannot be assigned; both offender lists are
    /// complete.
    #[error("cannot assign users: {}", rejection_detail(.missing, .inactive))]
    RejectedAssignees {
        /// Identifiers the directory's default listing did not return.
        missing: Vec<UserId>,
        /// Usernames of returned users that are not active.
        inactive: Vec<Username>,
    },

    /// The directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

fn rejection_detail(missing: &[UserId], inactive: &[Username]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("unknown user ids [{}]", join_displayed(missing)));
    }
    if !inactive.is_empty() {
        parts.push(format!("inactive users [{}]", join_displayed(inactive)));
    }
    parts.join("; ")
}

fn join_displayed<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
