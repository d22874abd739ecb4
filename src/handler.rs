//! The handler capability and its error types.

use std::sync::Arc;

use thiserror::Error;

use crate::level::Level;
use crate::log_record::LogRecord;

/// Reasons a single delivery attempt failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The payload could not be encoded as JSON.
    #[error("failed to marshal JSON: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The request could not be constructed, typically an unparsable URL.
    #[error("failed to create request: {0}")]
    Request(String),
    /// Connection, TLS or timeout failure before a status was received.
    #[error("request failed: {0}")]
    Transport(String),
    /// The webhook answered with a status code of 400 or above.
    #[error("webhook returned non-OK status: {0}")]
    Status(u16),
}

/// Errors returned by [`LogHandler::handle`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The record could not be delivered to the webhook.
    #[error("failed to deliver log: {0}")]
    Delivery(#[source] DeliveryError),
}

impl HandlerError {
    /// HTTP status returned by the webhook, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HandlerError::Delivery(DeliveryError::Status(code)) => Some(*code),
            HandlerError::Delivery(_) => None,
        }
    }
}

/// Trait implemented by terminal log handlers.
///
/// `LogHandler` is `Send + Sync` so one handler can be shared by every
/// thread that logs. Implementations do their work on the calling thread.
pub trait LogHandler: Send + Sync {
    /// Whether records at `level` would be handled.
    fn enabled(&self, level: Level) -> bool;

    /// Process a single record and report the outcome to the caller.
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError>;

    /// Derive a handler carrying extra attributes for every record.
    fn with_attrs(&self, attrs: &[(String, String)]) -> Box<dyn LogHandler>;

    /// Derive a handler that nests subsequent attributes under `name`.
    fn with_group(&self, name: &str) -> Box<dyn LogHandler>;
}

impl<H: LogHandler + ?Sized> LogHandler for Box<H> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        (**self).handle(record)
    }

    fn with_attrs(&self, attrs: &[(String, String)]) -> Box<dyn LogHandler> {
        (**self).with_attrs(attrs)
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        (**self).with_group(name)
    }
}

impl<H: LogHandler + ?Sized> LogHandler for Arc<H> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        (**self).handle(record)
    }

    fn with_attrs(&self, attrs: &[(String, String)]) -> Box<dyn LogHandler> {
        (**self).with_attrs(attrs)
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        (**self).with_group(name)
    }
}
