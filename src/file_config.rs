//! INI configuration for the Discord handler.
//!
//! Parsing uses the `rust-ini` crate. The `[webhook]` section is required
//! and must name a `url`; `[colors]` is optional and maps level names to
//! colours written in hex (`0xf1c40f`) or decimal.
//!
//! ```ini
//! [webhook]
//! url = https://discord.com/api/webhooks/123/abc
//! min_level = INFO
//! timeout_ms = 2500
//! username = Alerts
//!
//! [colors]
//! WARN = 0xf1c40f
//! ERROR = 15158332
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ini::{Ini, Properties};
use thiserror::Error;

use crate::handlers::DiscordHandlerBuilder;
use crate::level::Level;

const WEBHOOK_SECTION: &str = "webhook";
const COLORS_SECTION: &str = "colors";

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("{0} doesn't exist")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration is invalid: {0}")]
    Parse(String),
    #[error("missing [{0}] section")]
    MissingSection(&'static str),
    #[error("missing required key '{0}'")]
    MissingKey(&'static str),
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read `path` and return a builder preloaded with its settings.
pub fn load_builder(path: impl AsRef<Path>) -> Result<DiscordHandlerBuilder, ConfigFileError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ConfigFileError::NotFound(display.clone()),
        _ => ConfigFileError::Io {
            path: display.clone(),
            source: err,
        },
    })?;
    builder_from_str(&text)
}

/// Parse INI `text` into a builder.
pub fn builder_from_str(text: &str) -> Result<DiscordHandlerBuilder, ConfigFileError> {
    let ini = Ini::load_from_str(text).map_err(|err| ConfigFileError::Parse(err.to_string()))?;
    let webhook = ini
        .section(Some(WEBHOOK_SECTION))
        .ok_or(ConfigFileError::MissingSection(WEBHOOK_SECTION))?;

    let mut builder = apply_webhook_section(DiscordHandlerBuilder::new(), webhook)?;
    if let Some(colors) = ini.section(Some(COLORS_SECTION)) {
        builder = apply_colors_section(builder, colors)?;
    }
    Ok(builder)
}

fn apply_webhook_section(
    mut builder: DiscordHandlerBuilder,
    props: &Properties,
) -> Result<DiscordHandlerBuilder, ConfigFileError> {
    let url = props
        .get("url")
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigFileError::MissingKey("url"))?;
    builder = builder.with_url(url.trim());

    if let Some(level) = props.get("min_level") {
        builder = builder.with_min_level(parse_level("min_level", level)?);
    }
    if let Some(timeout) = props.get("timeout_ms") {
        let millis = timeout
            .trim()
            .parse::<u64>()
            .map_err(|err| invalid("timeout_ms", timeout, err))?;
        builder = builder.with_timeout_ms(millis);
    }
    if let Some(username) = props.get("username") {
        builder = builder.with_username(username.trim());
    }
    if let Some(avatar_url) = props.get("avatar_url") {
        builder = builder.with_avatar_url(avatar_url.trim());
    }
    Ok(builder)
}

fn apply_colors_section(
    mut builder: DiscordHandlerBuilder,
    props: &Properties,
) -> Result<DiscordHandlerBuilder, ConfigFileError> {
    for (key, value) in props.iter() {
        let level = parse_level(key, key)?;
        builder = builder.with_level_color(level, parse_color(key, value)?);
    }
    Ok(builder)
}

fn parse_level(key: &str, value: &str) -> Result<Level, ConfigFileError> {
    value.parse().map_err(|err| invalid(key, value, err))
}

/// Parse `0xRRGGBB`, `#RRGGBB` or a decimal integer.
///
/// `#` only survives when the value is quoted, since INI treats it as a
/// comment marker at the start of a line.
fn parse_color(key: &str, value: &str) -> Result<u32, ConfigFileError> {
    let trimmed = value.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'));
    let parsed = match hex {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => trimmed.parse(),
    };
    let color = parsed.map_err(|err| invalid(key, value, err))?;
    if color > 0xff_ffff {
        return Err(invalid(key, value, "colour exceeds 0xffffff"));
    }
    Ok(color)
}

fn invalid(key: &str, value: &str, reason: impl ToString) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
        reason: reason.to_string(),
    }
}
