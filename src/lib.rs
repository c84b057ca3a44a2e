//! Teamboard: task tracking client for small teams.
//!
//! This crate implements the client side of a team task tracker whose
//! persistence, authentication, and row-level access control live in a
//! hosted backend reached over REST. The client owns the derived state:
//! kanban board grouping, drag-and-drop status transitions, task
//! statistics, filtering, and per-user workload aggregation.
//!
//! # Architecture
//!
//! Teamboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (REST backend, webhook,
//!   in-memory test doubles)
//!
//! # Modules
//!
//! - [`board`]: Kanban board state, drag session controller, and
//!   server-confirmed status transitions
//! - [`task`]: Task records, gateway port, catalog and insight services
//! - [`profile`]: Profiles, authentication sessions, and team administration
//! - [`backend`]: Shared REST client plumbing for the hosted backend
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Tracing subscriber setup
//! - [`failure`]: Failure classification shared by every error type

pub mod backend;
pub mod board;
pub mod config;
pub mod failure;
pub mod profile;
pub mod task;
pub mod telemetry;
