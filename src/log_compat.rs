//! Compatibility bridge for the Rust `log` crate.
//!
//! This module provides [`DiscordLogAdapter`], an implementation of
//! `log::Log` that converts each `log` record into a [`LogRecord`] and hands
//! it to a [`LogHandler`], usually a
//! [`DiscordHandler`](crate::webhook::DiscordHandler). Structured key/values
//! attached with `log`'s `kv` syntax become embed fields.

use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::handler::LogHandler;
use crate::level::Level;
use crate::log_record::{LogRecord, RecordMetadata};
use crate::rate_limited_warner::{RateLimitedWarner, warn_delivery_failure};
use crate::reentrancy::guarded;

/// Adapter implementing the Rust `log::Log` trait.
///
/// `log::Log::log` cannot return an error, so delivery failures are
/// counted and reported on stderr at most once per warning interval.
pub struct DiscordLogAdapter<H> {
    handler: H,
    warner: RateLimitedWarner,
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Trace,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

/// Collects `log` key/values in the order the call site listed them.
struct AttributeCollector<'a>(&'a mut Vec<(String, String)>);

impl<'kvs> VisitSource<'kvs> for AttributeCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

fn to_log_record(record: &Record<'_>) -> LogRecord {
    let metadata = RecordMetadata {
        module_path: record.module_path().unwrap_or_default().to_string(),
        filename: record.file().unwrap_or_default().to_string(),
        line_number: record.line().unwrap_or(0),
        ..Default::default()
    };
    let mut converted = LogRecord::with_metadata(
        record.target(),
        Level::from(record.level()),
        &record.args().to_string(),
        metadata,
    );
    if record
        .key_values()
        .visit(&mut AttributeCollector(&mut converted.attributes))
        .is_err()
    {
        converted
            .attributes
            .push(("kv_error".into(), "failed to read key/values".into()));
    }
    converted
}

impl<H: LogHandler> DiscordLogAdapter<H> {
    pub fn new(handler: H) -> Self {
        Self::with_warner(handler, RateLimitedWarner::default())
    }

    /// Use a custom warner, e.g. with a different interval.
    pub fn with_warner(handler: H, warner: RateLimitedWarner) -> Self {
        Self { handler, warner }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H: LogHandler> log::Log for DiscordLogAdapter<H> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.handler.enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let outcome = guarded(|| self.handler.handle(&to_log_record(record)));
        if let Some(Err(err)) = outcome {
            warn_delivery_failure(&self.warner, &err);
        }
    }

    fn flush(&self) {
        self.warner.flush(|count| {
            eprintln!("discord_webhook_log: {count} record(s) not delivered");
        });
    }
}

/// Install `adapter` as the global `log` logger.
///
/// `max_level` is the facade's own filter; the handler's minimum level is
/// still applied on top of it.
///
/// # Errors
///
/// Fails when another global logger has already been set.
pub fn init<H>(adapter: DiscordLogAdapter<H>, max_level: LevelFilter) -> Result<(), SetLoggerError>
where
    H: LogHandler + 'static,
{
    log::set_boxed_logger(Box::new(adapter))?;
    log::set_max_level(max_level);
    Ok(())
}
