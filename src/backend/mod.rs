//! Shared REST plumbing for the hosted backend.
//!
//! The hosted backend exposes a PostgREST table API under `/rest/v1/` and a
//! GoTrue authentication API under `/auth/v1/`. Every adapter in the crate
//! builds its requests through [`BackendClient`] so the `apikey` and bearer
//! headers stay consistent, and classifies responses through
//! [`check_response`].

mod client;
mod error;

pub use client::BackendClient;
pub use error::{BackendError, BackendResult, check_response};
