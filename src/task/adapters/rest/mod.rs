//! REST adapters for the hosted task table and the chat webhook.

mod gateway;
mod models;
mod webhook;

pub use gateway::RestTaskGateway;
pub use webhook::{WebhookNotifier, render_message};
