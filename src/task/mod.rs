//! Task lifecycle and assignment management for Foreman.
//!
//! This module implements the core engine: creating tasks inside active
//! projects, validating and replacing multi-user assignee sets, advancing
//! status through a constrained state machine, and reading assignment data
//! consistently even when assignees have since been soft-deleted in the
//! directory. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
