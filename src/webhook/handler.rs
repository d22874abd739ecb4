//! Public handler type exported by the crate.

use std::fmt;
use std::sync::Arc;

use ureq::Agent;

use crate::embed::{Embed, build_embed};
use crate::handler::{HandlerError, LogHandler};
use crate::handlers::HandlerBuildError;
use crate::level::Level;
use crate::log_record::LogRecord;

use super::config::{WebhookConfig, effective_timeout};
use super::delivery::{build_agent, send};
use super::payload::Payload;

/// Handler rendering each record as a Discord embed and posting it to a
/// webhook.
///
/// Delivery is synchronous: [`handle`](LogHandler::handle) returns once
/// the webhook has answered or the timeout expired. Clones share the
/// configuration and HTTP agent.
#[derive(Clone)]
pub struct DiscordHandler {
    config: Arc<WebhookConfig>,
    agent: Agent,
}

impl DiscordHandler {
    /// Construct the handler from a configuration object.
    ///
    /// Prefer [`DiscordHandlerBuilder`](crate::handlers::DiscordHandlerBuilder),
    /// which validates the URL first.
    pub fn with_config(config: WebhookConfig) -> Result<Self, HandlerBuildError> {
        let agent = build_agent()?;
        Ok(Self {
            config: Arc::new(config),
            agent,
        })
    }

    /// The configuration this handler was built with.
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Render the embed for `record` without sending anything.
    pub fn embed_for(&self, record: &LogRecord) -> Embed {
        build_embed(
            record,
            &self.config.level_colors,
            self.config.custom_embed.as_ref(),
        )
    }

    /// Wrap the embed for `record` in a payload carrying the configured
    /// username and avatar.
    pub fn payload_for(&self, record: &LogRecord) -> Payload {
        Payload::new(self.embed_for(record))
            .with_username(self.config.username.as_deref())
            .with_avatar_url(self.config.avatar_url.as_deref())
    }
}

impl LogHandler for DiscordHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.config.effective_min_level()
    }

    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        let payload = self.payload_for(record);
        send(
            &self.agent,
            &self.config.url,
            &payload,
            effective_timeout(self.config.timeout),
        )
        .map_err(HandlerError::Delivery)
    }

    /// Returns an equivalent handler; `attrs` are discarded.
    ///
    /// Only attributes attached to a record at the call site become embed
    /// fields.
    fn with_attrs(&self, _attrs: &[(String, String)]) -> Box<dyn LogHandler> {
        Box::new(self.clone())
    }

    /// Returns an equivalent handler; groups are not tracked.
    fn with_group(&self, _name: &str) -> Box<dyn LogHandler> {
        Box::new(self.clone())
    }
}

impl fmt::Debug for DiscordHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordHandler")
            .field("config", &self.config)
            .finish()
    }
}
