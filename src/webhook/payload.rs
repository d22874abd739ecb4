//! Top-level JSON body posted to the webhook.

use serde::{Serialize, Serializer};

use crate::embed::Embed;

/// Message body accepted by Discord's execute-webhook endpoint.
///
/// A payload holds exactly one embed, written on the wire as the
/// single-element `embeds` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(rename = "embeds", serialize_with = "single_embed")]
    embed: Embed,
}

impl Payload {
    pub fn new(embed: Embed) -> Self {
        Self {
            username: None,
            avatar_url: None,
            embed,
        }
    }

    /// Set the display name. Empty names are treated as unset.
    pub fn with_username(mut self, username: Option<&str>) -> Self {
        self.username = non_empty(username);
        self
    }

    /// Set the avatar URL. Empty URLs are treated as unset.
    pub fn with_avatar_url(mut self, avatar_url: Option<&str>) -> Self {
        self.avatar_url = non_empty(avatar_url);
        self
    }

    /// The embed this payload delivers.
    pub fn embed(&self) -> &Embed {
        &self.embed
    }
}

fn single_embed<S: Serializer>(embed: &Embed, serializer: S) -> Result<S::Ok, S::Error> {
    std::slice::from_ref(embed).serialize(serializer)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{EmbedField, EmbedFooter};
    use serde_json::json;

    fn sample_embed() -> Embed {
        Embed {
            title: "WARN".into(),
            description: "disk low".into(),
            color: 0xf1c40f,
            timestamp: "2024-05-01T12:00:00Z".into(),
            fields: vec![EmbedField::new("pct", "92", false)],
            footer: None,
        }
    }

    #[test]
    fn optional_members_are_omitted() {
        let value = serde_json::to_value(Payload::new(sample_embed())).expect("serialise");
        assert_eq!(
            value,
            json!({
                "embeds": [{
                    "title": "WARN",
                    "description": "disk low",
                    "color": 0xf1c40f,
                    "timestamp": "2024-05-01T12:00:00Z",
                    "fields": [{ "name": "pct", "value": "92", "inline": false }]
                }]
            })
        );
    }

    #[test]
    fn identity_and_footer_are_written_when_present() {
        let mut embed = sample_embed();
        embed.footer = Some(EmbedFooter {
            text: "host-1".into(),
        });
        let payload = Payload::new(embed)
            .with_username(Some("Alerts"))
            .with_avatar_url(Some("https://example.invalid/a.png"));
        let value = serde_json::to_value(&payload).expect("serialise");
        assert_eq!(value["username"], "Alerts");
        assert_eq!(value["avatar_url"], "https://example.invalid/a.png");
        assert_eq!(value["embeds"][0]["footer"]["text"], "host-1");
    }

    #[test]
    fn wire_body_holds_exactly_the_one_embed() {
        let payload = Payload::new(sample_embed());
        let value = serde_json::to_value(&payload).expect("serialise");
        let embeds = value["embeds"].as_array().expect("embeds array");
        assert_eq!(embeds.len(), 1);
        assert_eq!(
            embeds[0],
            serde_json::to_value(payload.embed()).expect("serialise embed")
        );
    }

    #[test]
    fn empty_identity_strings_are_dropped() {
        let payload = Payload::new(sample_embed())
            .with_username(Some(""))
            .with_avatar_url(None);
        assert_eq!(payload.username, None);
        assert_eq!(payload.avatar_url, None);
        assert_eq!(payload.embed().title, "WARN");
    }
}
