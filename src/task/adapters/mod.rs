//! Adapter implementations for task ports.
//!
//! - [`rest`]: PostgREST gateway and chat webhook notifier
//! - [`memory`]: in-memory gateway and recording notifier for tests and
//!   offline use
//! - [`notifying`]: gateway decorator that announces successful changes

pub mod memory;
pub mod notifying;
pub mod rest;
