//! Port contracts for directory lookups.
//!
//! Ports define infrastructure-agnostic interfaces used by the task engine
//! to consult the external user and project directories.

pub mod lookup;

pub use lookup::{DirectoryError, DirectoryResult, ProjectDirectory, UserDirectory};
