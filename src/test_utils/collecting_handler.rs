//! A simple handler that accumulates records in memory for test assertions.
//!
//! Lets the `log` and `tracing` bridges be exercised without any network
//! traffic.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::handler::{DeliveryError, HandlerError, LogHandler};
use crate::level::Level;
use crate::log_record::LogRecord;

/// Handler that stores every record it receives for later inspection.
#[derive(Clone, Default)]
pub struct CollectingHandler {
    records: Arc<Mutex<Vec<LogRecord>>>,
    min_level: Option<Level>,
    fail_with_status: Option<u16>,
}

impl CollectingHandler {
    /// Create a new empty handler accepting every level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept records at or above `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Record every call but report it as rejected with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    /// Return a snapshot of all records received so far.
    pub fn collected(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }
}

impl LogHandler for CollectingHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level.unwrap_or(Level::LOWEST)
    }

    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self.records.lock().push(record.clone());
        match self.fail_with_status {
            Some(status) => Err(HandlerError::Delivery(DeliveryError::Status(status))),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, _attrs: &[(String, String)]) -> Box<dyn LogHandler> {
        Box::new(self.clone())
    }

    fn with_group(&self, _name: &str) -> Box<dyn LogHandler> {
        Box::new(self.clone())
    }
}
