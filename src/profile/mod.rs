//! Team members, sign-in sessions and team administration.
//!
//! Authentication and profile storage belong to the hosted backend. Every
//! operation that depends on who is signed in takes a [`domain::UserSession`]
//! explicitly.
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
