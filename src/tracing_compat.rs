//! Bridge from `tracing` events to a [`LogHandler`].
//!
//! [`DiscordLayer`] is a `tracing_subscriber::Layer`. Each event becomes one
//! [`LogRecord`]: the `message` field is the record message and every other
//! event field an attribute. Span fields are not merged into events.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::handler::LogHandler;
use crate::level::Level;
use crate::log_record::{LogRecord, RecordMetadata};
use crate::rate_limited_warner::{RateLimitedWarner, warn_delivery_failure};
use crate::reentrancy::guarded;

/// Layer forwarding `tracing` events to a handler.
pub struct DiscordLayer<H> {
    handler: H,
    warner: RateLimitedWarner,
}

impl<H: LogHandler> DiscordLayer<H> {
    pub fn new(handler: H) -> Self {
        Self::with_warner(handler, RateLimitedWarner::default())
    }

    pub fn with_warner(handler: H, warner: RateLimitedWarner) -> Self {
        Self { handler, warner }
    }
}

fn map_level(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG => Level::Debug,
        _ => Level::Trace,
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    attributes: Vec<(String, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.attributes.push((field.name().to_owned(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

fn to_log_record(event: &Event<'_>) -> LogRecord {
    let meta = event.metadata();
    let mut visitor = EventVisitor::default();
    event.record(&mut visitor);

    let metadata = RecordMetadata {
        module_path: meta.module_path().unwrap_or_default().to_string(),
        filename: meta.file().unwrap_or_default().to_string(),
        line_number: meta.line().unwrap_or(0),
        ..Default::default()
    };
    let mut record = LogRecord::with_metadata(
        meta.target(),
        map_level(meta.level()),
        visitor.message.as_deref().unwrap_or_default(),
        metadata,
    );
    record.attributes = visitor.attributes;
    record
}

impl<S, H> Layer<S> for DiscordLayer<H>
where
    S: Subscriber,
    H: LogHandler + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.handler.enabled(map_level(event.metadata().level())) {
            return;
        }
        let outcome = guarded(|| self.handler.handle(&to_log_record(event)));
        if let Some(Err(err)) = outcome {
            warn_delivery_failure(&self.warner, &err);
        }
    }
}
