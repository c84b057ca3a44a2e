//! Adapter implementations for profile ports.
//!
//! - [`rest`]: GoTrue authentication and PostgREST profile tables
//! - [`memory`]: in-memory account store and directory for tests and
//!   offline use

pub mod memory;
pub mod rest;
