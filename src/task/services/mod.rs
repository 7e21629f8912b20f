//! Application services for task orchestration.

mod assignment;
mod orchestrator;

pub use assignment::{AssignmentError, AssignmentResolver};
pub use orchestrator::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceErrorKind, TaskServiceResult,
    UpdateTaskRequest,
};
