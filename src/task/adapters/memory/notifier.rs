//! Recording notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{NotifierError, NotifierResult, TaskEvent, TaskNotifier};

/// Notifier that keeps every delivered event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<TaskEvent>,
    failing: bool,
}

fn lock_error(err: impl std::fmt::Display) -> NotifierError {
    NotifierError::delivery(std::io::Error::other(err.to_string()))
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent deliveries fail without recording the event.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when lock acquisition fails.
    pub fn set_failing(&self, failing: bool) -> NotifierResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing = failing;
        Ok(())
    }

    /// Returns the delivered events in order.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Delivery`] when lock acquisition fails.
    pub fn events(&self) -> NotifierResult<Vec<TaskEvent>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.events.clone())
    }
}

#[async_trait]
impl TaskNotifier for RecordingNotifier {
    async fn notify(&self, event: &TaskEvent) -> NotifierResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.failing {
            return Err(NotifierError::delivery(std::io::Error::other(
                "recording notifier marked failing",
            )));
        }
        state.events.push(event.clone());
        Ok(())
    }
}
