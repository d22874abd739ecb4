//! Discord webhook handler implementation.
//!
//! This module defines [`DiscordHandler`], a handler that renders
//! [`LogRecord`](crate::log_record::LogRecord) values as Discord embeds and
//! posts them to a webhook URL.
//!
//! # Delivery Semantics
//!
//! Each handled record produces exactly one POST carrying exactly one embed,
//! made on the calling thread:
//!
//! - **< 400**: Success.
//! - **>= 400**: Failure reported with the status code (429 included).
//! - **Network errors and timeouts**: Failure reported with the cause.
//!
//! Nothing is retried, queued or batched. A zero timeout selects
//! [`DEFAULT_TIMEOUT`] for each request.

mod config;
mod delivery;
mod handler;
mod payload;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_TIMEOUT, WebhookConfig, effective_timeout};
pub use delivery::send;
pub use handler::DiscordHandler;
pub use payload::Payload;
