//! In-memory task adapters.

mod notifier;
mod task;

pub use notifier::RecordingNotifier;
pub use task::InMemoryTaskGateway;
