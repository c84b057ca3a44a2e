//! Port contracts for task access and change notifications.
//!
//! Ports define infrastructure-agnostic interfaces used by task and board
//! services.

pub mod gateway;
pub mod notifier;

pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};
pub use notifier::{NotifierError, NotifierResult, TaskEvent, TaskNotifier};

#[cfg(test)]
pub use gateway::MockTaskGateway;
#[cfg(test)]
pub use notifier::MockTaskNotifier;
