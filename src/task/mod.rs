//! Team tasks.
//!
//! Task records are owned by the hosted backend. This module provides the
//! domain vocabulary, the gateway port every read and write goes through,
//! change notifications, and the catalog and dashboard services built on
//! top. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
