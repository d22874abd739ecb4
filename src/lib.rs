//! Log handler that renders records as Discord embeds and posts them to a
//! webhook.
//!
//! [`DiscordHandler`] turns each [`LogRecord`] into a single embed (level as
//! title, message as description, call-site attributes as fields, colour
//! from a per-level table) and delivers it with one blocking HTTP POST.
//! The result of that POST is returned to the caller of
//! [`LogHandler::handle`].
//!
//! The handler plugs into the `log` facade through [`DiscordLogAdapter`]
//! and into `tracing` through [`DiscordLayer`].
//!
//! ```no_run
//! use discord_webhook_log::{
//!     DiscordHandlerBuilder, HandlerBuilderTrait, Level, LevelColors, LogHandler, LogRecord,
//! };
//!
//! let handler = DiscordHandlerBuilder::new()
//!     .with_url("https://discord.com/api/webhooks/123/abc")
//!     .with_username("Alerts")
//!     .with_level_colors(LevelColors::standard())
//!     .build_inner()?;
//!
//! let record = LogRecord::new("storage", Level::Warn, "disk low").with_attr("pct", "92");
//! handler.handle(&record)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod embed;
pub mod file_config;
pub mod handler;
pub mod handlers;
pub mod level;
pub mod log_record;
pub mod rate_limited_warner;
#[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
mod reentrancy;
pub mod webhook;

#[cfg(feature = "log-compat")]
pub mod log_compat;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use embed::{
    CustomEmbed, Embed, EmbedField, EmbedFooter, LevelColors, build_embed, default_embed,
};
pub use file_config::{ConfigFileError, builder_from_str, load_builder};
pub use handler::{DeliveryError, HandlerError, LogHandler};
pub use handlers::{DiscordHandlerBuilder, HandlerBuildError, HandlerBuilderTrait};
pub use level::{Level, ParseLevelError};
pub use log_record::{LogRecord, RecordMetadata};
pub use rate_limited_warner::{DEFAULT_WARN_INTERVAL, RateLimitedWarner};
pub use webhook::{DEFAULT_TIMEOUT, DiscordHandler, Payload, WebhookConfig, effective_timeout};

#[cfg(feature = "log-compat")]
pub use log_compat::DiscordLogAdapter;
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::DiscordLayer;
