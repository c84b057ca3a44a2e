//! Closed status and priority sets.
//!
//! The canonical representations are the exact strings stored by the
//! backend. Parsing also accepts ASCII aliases so command-line input does not
//! require the accented forms.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The declaration order is the board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "Yapılacak")]
    Todo,
    /// Work is under way.
    #[serde(rename = "Devam Ediyor")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Tamamlandı")]
    Done,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Yapılacak",
            Self::InProgress => "Devam Ediyor",
            Self::Done => "Tamamlandı",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if let Some(status) = Self::ALL.into_iter().find(|s| s.as_str() == trimmed) {
            return Ok(status);
        }
        match trimmed.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "in_progress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Can wait.
    #[serde(rename = "Düşük")]
    Low,
    /// Normal priority.
    #[serde(rename = "Orta")]
    Medium,
    /// Should be picked up soon.
    #[serde(rename = "Yüksek")]
    High,
    /// Needs immediate attention.
    #[serde(rename = "Acil")]
    Urgent,
}

impl TaskPriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Düşük",
            Self::Medium => "Orta",
            Self::High => "Yüksek",
            Self::Urgent => "Acil",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if let Some(priority) = Self::ALL.into_iter().find(|p| p.as_str() == trimmed) {
            return Ok(priority);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}
