//! Discord embed model and the record-to-embed transform.
//!
//! [`default_embed`] is the built-in rendering: the level becomes the title,
//! the message the description, and every call-site attribute a
//! non-inline field. Callers that want a different layout supply a
//! [`CustomEmbed`] which replaces the default entirely.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::log_record::LogRecord;

/// User-supplied replacement for [`default_embed`].
///
/// The returned embed is sent as-is; nothing validates it.
pub type CustomEmbed = Arc<dyn Fn(&LogRecord, &LevelColors) -> Embed + Send + Sync>;

/// Structured message block rendered by Discord.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// RGB colour packed into an integer, `0` when unset.
    pub color: u32,
    /// RFC3339 timestamp shown beside the footer.
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Colour per level, keyed by the level's canonical name on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelColors(BTreeMap<Level, u32>);

impl LevelColors {
    /// An empty table; every level renders with colour `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gray, blue, yellow and red for DEBUG through ERROR.
    pub fn standard() -> Self {
        [
            (Level::Debug, 0x95a5a6),
            (Level::Info, 0x3498db),
            (Level::Warn, 0xf1c40f),
            (Level::Error, 0xe74c3c),
        ]
        .into_iter()
        .collect()
    }

    /// Set the colour for `level`, returning the previous one.
    pub fn insert(&mut self, level: Level, color: u32) -> Option<u32> {
        self.0.insert(level, color)
    }

    /// Colour for `level`, or `0` when the table has no entry.
    pub fn get(&self, level: Level) -> u32 {
        self.0.get(&level).copied().unwrap_or_default()
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0.contains_key(&level)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Level, u32)> for LevelColors {
    fn from_iter<I: IntoIterator<Item = (Level, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(Level, u32)> for LevelColors {
    fn extend<I: IntoIterator<Item = (Level, u32)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Format `at` as RFC3339 in UTC with second precision.
pub fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render `record` with the built-in layout.
///
/// The timestamp is the moment the record was created.
pub fn default_embed(record: &LogRecord, colors: &LevelColors) -> Embed {
    Embed {
        title: record.level.as_str().to_owned(),
        description: record.message.clone(),
        color: colors.get(record.level),
        timestamp: rfc3339(&record.metadata.timestamp),
        fields: record
            .attributes
            .iter()
            .map(|(name, value)| EmbedField::new(name.as_str(), value.as_str(), false))
            .collect(),
        footer: None,
    }
}

/// Render `record`, delegating to `custom` when one is configured.
pub fn build_embed(
    record: &LogRecord,
    colors: &LevelColors,
    custom: Option<&CustomEmbed>,
) -> Embed {
    match custom {
        Some(custom) => custom(record, colors),
        None => default_embed(record, colors),
    }
}
