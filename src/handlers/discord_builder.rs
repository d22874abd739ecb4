//! Builder for [`DiscordHandler`](crate::webhook::DiscordHandler).
//!
//! Exposes the webhook URL, level threshold, timeout, display identity,
//! level colours and the custom embed hook. Only the URL is required.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::embed::{CustomEmbed, Embed, LevelColors};
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::webhook::{DiscordHandler, WebhookConfig};

use super::{HandlerBuildError, HandlerBuilderTrait};

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`DiscordHandler`] instances.
#[derive(Clone, Default)]
pub struct DiscordHandlerBuilder {
    url: Option<String>,
    min_level: Option<Level>,
    timeout: Option<Duration>,
    username: Option<String>,
    avatar_url: Option<String>,
    level_colors: LevelColors,
    custom_embed: Option<CustomEmbed>,
}

impl DiscordHandlerBuilder {
    /// Create a new builder with no URL configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the webhook URL (required).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    option_setter!(
        #[doc = "Skip records below `level`. Defaults to letting every level through."]
        with_min_level,
        min_level,
        Level
    );
    option_setter!(
        #[doc = "Set the request timeout. A zero duration selects the 5 second default."]
        with_timeout,
        timeout,
        Duration
    );

    /// Set the request timeout in milliseconds. Zero selects the 5 second default.
    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Override the webhook's display name.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Override the webhook's avatar image.
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Replace the whole colour table.
    pub fn with_level_colors(mut self, colors: LevelColors) -> Self {
        self.level_colors = colors;
        self
    }

    /// Set the colour for a single level.
    pub fn with_level_color(mut self, level: Level, color: u32) -> Self {
        self.level_colors.insert(level, color);
        self
    }

    /// Render embeds with `custom` instead of the default layout.
    pub fn with_custom_embed<F>(mut self, custom: F) -> Self
    where
        F: Fn(&LogRecord, &LevelColors) -> Embed + Send + Sync + 'static,
    {
        self.custom_embed = Some(Arc::new(custom));
        self
    }

    fn validate(&self) -> Result<(), HandlerBuildError> {
        self.validate_url()?;
        Ok(())
    }

    fn validate_url(&self) -> Result<(), HandlerBuildError> {
        match &self.url {
            None => Err(HandlerBuildError::InvalidConfig(
                "Discord handler requires a webhook URL".into(),
            )),
            Some(url) if url.trim().is_empty() => Err(HandlerBuildError::InvalidConfig(
                "URL must not be empty".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Validate the builder and produce the configuration it describes.
    pub fn build_config(&self) -> Result<WebhookConfig, HandlerBuildError> {
        self.validate()?;

        Ok(WebhookConfig {
            min_level: self.min_level,
            timeout: self.timeout.unwrap_or(Duration::ZERO),
            url: self.url.clone().unwrap_or_default(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            level_colors: self.level_colors.clone(),
            custom_embed: self.custom_embed.clone(),
        })
    }
}

impl HandlerBuilderTrait for DiscordHandlerBuilder {
    type Handler = DiscordHandler;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError> {
        let config = self.build_config()?;
        DiscordHandler::with_config(config)
    }
}

impl fmt::Debug for DiscordHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordHandlerBuilder")
            .field("url", &self.url)
            .field("min_level", &self.min_level)
            .field("timeout", &self.timeout)
            .field("username", &self.username)
            .field("avatar_url", &self.avatar_url)
            .field("level_colors", &self.level_colors)
            .field("custom_embed", &self.custom_embed.is_some())
            .finish()
    }
}
