//! Foreman: task lifecycle and assignment management core.
//!
//! This crate provides the domain engine of a project-based work tracker:
//! task creation, multi-user assignment with directory-backed eligibility
//! checks, a constrained status state machine, and consistency-safe reads
//! of assignment data in the presence of soft-deleted collaborators.
//!
//! Transport, authentication, and persistence technology live outside this
//! crate; the engine exposes plain operations with typed inputs and
//! outputs and consumes its collaborators through ports.
//!
//! # Architecture
//!
//! Foreman follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`directory`]: Read-only user and project directory collaborators
//! - [`task`]: Task lifecycle, assignment, and orchestration

pub mod directory;
pub mod task;
