//! Configuration consumed by the Discord handler.
//!
//! `DiscordHandlerBuilder` constructs these values before passing them to
//! [`DiscordHandler`](super::DiscordHandler). A config is never modified
//! once a handler owns it.

use std::fmt;
use std::time::Duration;

use crate::embed::{CustomEmbed, LevelColors};
use crate::level::Level;

/// Request timeout used whenever the configured timeout is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve the timeout for one request.
///
/// A zero `configured` value means "not set" and maps to [`DEFAULT_TIMEOUT`].
pub fn effective_timeout(configured: Duration) -> Duration {
    if configured.is_zero() {
        DEFAULT_TIMEOUT
    } else {
        configured
    }
}

/// Configuration object describing how to construct a
/// [`DiscordHandler`](super::DiscordHandler).
#[derive(Clone, Default)]
pub struct WebhookConfig {
    /// Records below this level are skipped. `None` lets everything through.
    pub min_level: Option<Level>,
    /// Overall request timeout. Zero selects [`DEFAULT_TIMEOUT`] per request.
    pub timeout: Duration,
    /// Discord webhook URL.
    pub url: String,
    /// Display name overriding the webhook's default.
    pub username: Option<String>,
    /// Avatar image overriding the webhook's default.
    pub avatar_url: Option<String>,
    /// Embed colour per level.
    pub level_colors: LevelColors,
    /// Replacement for the default embed layout.
    pub custom_embed: Option<CustomEmbed>,
}

impl WebhookConfig {
    /// Config posting to `url` with every other setting at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// The threshold the level filter compares against.
    pub fn effective_min_level(&self) -> Level {
        self.min_level.unwrap_or(Level::LOWEST)
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("min_level", &self.min_level)
            .field("timeout", &self.timeout)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("avatar_url", &self.avatar_url)
            .field("level_colors", &self.level_colors)
            .field("custom_embed", &self.custom_embed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::ZERO, DEFAULT_TIMEOUT)]
    #[case(Duration::from_millis(250), Duration::from_millis(250))]
    #[case(Duration::from_secs(30), Duration::from_secs(30))]
    fn zero_timeout_falls_back(#[case] configured: Duration, #[case] expected: Duration) {
        assert_eq!(effective_timeout(configured), expected);
    }

    #[rstest]
    fn defaults_allow_every_level() {
        let config = WebhookConfig::new("https://example.invalid/hook");
        assert_eq!(config.effective_min_level(), Level::Trace);
        assert!(config.timeout.is_zero());
        assert!(config.level_colors.is_empty());
        assert!(config.custom_embed.is_none());
    }

    #[rstest]
    fn debug_hides_custom_embed_body() {
        let mut config = WebhookConfig::new("https://example.invalid/hook");
        config.custom_embed = Some(std::sync::Arc::new(
            |_: &crate::log_record::LogRecord, _: &LevelColors| crate::embed::Embed::default(),
        ));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("custom_embed: true"));
    }
}
