//! Application services over the task gateway.

mod catalog;
mod insights;

pub use catalog::{CreateTaskRequest, TaskCatalogError, TaskCatalogService, TaskQuery};
pub use insights::{
    Dashboard, DashboardService, RECENT_TASK_LIMIT, TaskStatistics, WorkloadEntry, recent,
    workload,
};
