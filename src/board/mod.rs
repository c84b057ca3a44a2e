//! Kanban board.
//!
//! The board partitions the visible task set into one column per status and
//! moves tasks between columns only after the backend confirms the change.
//! A drag controller turns pointer or keyboard gestures into at most one
//! status change request per gesture.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
