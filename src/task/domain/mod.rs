//! Domain model for team tasks.
//!
//! Tasks are owned by the hosted backend; the client holds read copies and
//! issues partial updates. The closed status and priority sets, the query
//! filter, and the patch shape live here so adapters and services agree on
//! one vocabulary.

mod error;
mod filter;
mod ids;
mod patch;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::TaskId;
pub use patch::{NewTask, TaskPatch};
pub use status::{TaskPriority, TaskStatus};
pub use task::{Task, TaskRecord};
