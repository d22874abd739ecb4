//! Log record representation consumed by the Discord handler.
//!
//! A [`LogRecord`] captures one log call: its level, message and the
//! key/value attributes attached at the call site, together with its source
//! location and the time it was created.

use chrono::{DateTime, Utc};

use crate::level::Level;
use std::fmt;

/// Source location and creation time of a log record.
#[derive(Clone, Debug)]
pub struct RecordMetadata {
    /// Rust module path where the log call originated.
    pub module_path: String,
    /// Source file name for the log call.
    pub filename: String,
    /// Line number in the source file.
    pub line_number: u32,
    /// Time the record was created. Becomes the embed timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Default for RecordMetadata {
    fn default() -> Self {
        Self {
            module_path: String::new(),
            filename: String::new(),
            line_number: 0,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogRecord {
    /// Name of the logger (or `log`/`tracing` target) that created the record.
    pub logger: String,
    /// Severity of the record.
    pub level: Level,
    /// The log message content.
    pub message: String,
    /// Key/value pairs attached at the call site, in call-site order.
    pub attributes: Vec<(String, String)>,
    /// Contextual metadata for the record.
    pub metadata: RecordMetadata,
}

impl LogRecord {
    /// Construct a new log record from logger `name`, `level`, and `message`.
    pub fn new(logger: &str, level: Level, message: &str) -> Self {
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            attributes: Vec::new(),
            metadata: RecordMetadata::default(),
        }
    }

    /// Construct a log record with explicit source location and time.
    pub fn with_metadata(
        logger: &str,
        level: Level,
        message: &str,
        metadata: RecordMetadata,
    ) -> Self {
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            attributes: Vec::new(),
            metadata,
        }
    }

    /// Append one attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Append every attribute produced by `attrs`, keeping their order.
    pub fn with_attrs<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}
