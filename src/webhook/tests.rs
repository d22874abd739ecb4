//! Integration tests for the Discord handler against a local mock webhook.

use std::time::{Duration, Instant};

use rstest::rstest;

use crate::embed::{Embed, EmbedField, LevelColors};
use crate::handler::{DeliveryError, HandlerError, LogHandler};
use crate::handlers::{DiscordHandlerBuilder, HandlerBuilderTrait};
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::test_utils::{MockResponse, MockWebhook, refused_url};

use super::DiscordHandler;

const WAIT: Duration = Duration::from_secs(5);

fn build_handler(url: String) -> DiscordHandler {
    DiscordHandlerBuilder::new()
        .with_url(url)
        .with_timeout(Duration::from_secs(5))
        .with_level_color(Level::Warn, 0xf1c40f)
        .build_inner()
        .expect("build")
}

fn disk_low() -> LogRecord {
    LogRecord::new("storage", Level::Warn, "disk low").with_attr("pct", "92")
}

#[rstest]
fn posts_one_embed_as_json() {
    let server = MockWebhook::with_status(204);
    let handler = build_handler(server.url());

    handler.handle(&disk_low()).expect("204 is success");

    let captured = server.next_request(WAIT).expect("request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/webhooks/1/token");
    assert_eq!(captured.header("content-type"), Some("application/json"));

    let body = captured.json();
    let embeds = body["embeds"].as_array().expect("embeds array");
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0]["title"], "WARN");
    assert_eq!(embeds[0]["description"], "disk low");
    assert_eq!(embeds[0]["color"], 0xf1c40f);
    assert_eq!(
        embeds[0]["fields"],
        serde_json::json!([{ "name": "pct", "value": "92", "inline": false }])
    );
    assert!(body.get("username").is_none());
    assert!(body.get("avatar_url").is_none());
    assert!(embeds[0].get("footer").is_none());
}

#[rstest]
fn sends_username_and_avatar() {
    let server = MockWebhook::with_status(200);
    let handler = DiscordHandlerBuilder::new()
        .with_url(server.url())
        .with_username("Slog Notifications")
        .with_avatar_url("https://cdn.invalid/bot.png")
        .build_inner()
        .expect("build");

    handler
        .handle(&LogRecord::new("app", Level::Info, "hello"))
        .expect("200 is success");

    let body = server.next_request(WAIT).expect("request").json();
    assert_eq!(body["username"], "Slog Notifications");
    assert_eq!(body["avatar_url"], "https://cdn.invalid/bot.png");
}

#[rstest]
fn rate_limited_response_is_reported_once() {
    let server = MockWebhook::start(vec![MockResponse::status(429), MockResponse::status(200)]);
    let handler = build_handler(server.url());

    let err = handler.handle(&disk_low()).expect_err("429 is a failure");
    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("429"), "got {err}");
    assert!(err.to_string().starts_with("failed to deliver log"));

    server.next_request(WAIT).expect("first request");
    assert!(
        server.next_request(Duration::from_millis(300)).is_none(),
        "no retry after a failure"
    );
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(500)]
fn error_statuses_fail(#[case] status: u16) {
    let server = MockWebhook::with_status(status);
    let handler = build_handler(server.url());
    let err = handler.handle(&disk_low()).expect_err("status >= 400");
    assert!(matches!(
        err,
        HandlerError::Delivery(DeliveryError::Status(code)) if code == status
    ));
}

#[rstest]
fn connection_refused_is_a_transport_error() {
    let handler = build_handler(refused_url());
    let err = handler.handle(&disk_low()).expect_err("nothing is listening");
    assert!(
        matches!(err, HandlerError::Delivery(DeliveryError::Transport(_))),
        "got {err:?}"
    );
}

#[rstest]
fn zero_timeout_falls_back_to_five_seconds() {
    let server = MockWebhook::start(vec![MockResponse::delayed(204, Duration::from_secs(6))]);
    let handler = DiscordHandlerBuilder::new()
        .with_url(server.url())
        .with_timeout(Duration::ZERO)
        .build_inner()
        .expect("build");
    assert!(handler.config().timeout.is_zero());

    let started = Instant::now();
    let err = handler.handle(&disk_low()).expect_err("server is too slow");
    let elapsed = started.elapsed();

    assert!(matches!(
        err,
        HandlerError::Delivery(DeliveryError::Transport(_))
    ));
    assert!(elapsed >= Duration::from_secs(4), "timed out after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(5900), "timed out after {elapsed:?}");
    assert!(
        handler.config().timeout.is_zero(),
        "fallback must not be written back"
    );
}

#[rstest]
fn records_below_minimum_are_not_sent() {
    let server = MockWebhook::with_status(204);
    let handler = DiscordHandlerBuilder::new()
        .with_url(server.url())
        .with_min_level(Level::Error)
        .build_inner()
        .expect("build");

    assert!(!handler.enabled(Level::Warn));
    handler.handle(&disk_low()).expect("filtered records succeed");
    assert!(server.next_request(Duration::from_millis(300)).is_none());
}

#[rstest]
fn augmentation_attributes_are_dropped() {
    let server = MockWebhook::with_status(204);
    let handler = build_handler(server.url());

    let derived = handler
        .with_attrs(&[("service".to_string(), "billing".to_string())])
        .with_group("request");
    derived.handle(&disk_low()).expect("delivered");

    let body = server.next_request(WAIT).expect("request").json();
    let names: Vec<_> = body["embeds"][0]["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .map(|f| f["name"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(names, ["pct"]);
}

#[rstest]
fn custom_embed_reaches_the_wire_unchanged() {
    let server = MockWebhook::with_status(204);
    let handler = DiscordHandlerBuilder::new()
        .with_url(server.url())
        .with_level_colors(LevelColors::standard())
        .with_custom_embed(|record: &LogRecord, colors: &LevelColors| Embed {
            title: format!("Custom title: {}", record.level),
            description: format!("Custom description: {}", record.message),
            color: colors.get(record.level),
            timestamp: "2024-01-01T00:00:00Z".into(),
            fields: vec![EmbedField::new("Custom Field", "Custom Value", true)],
            footer: Some(crate::embed::EmbedFooter {
                text: "Custom Footer".into(),
            }),
        })
        .build_inner()
        .expect("build");

    handler.handle(&disk_low()).expect("delivered");

    let body = server.next_request(WAIT).expect("request").json();
    let embed = &body["embeds"][0];
    assert_eq!(embed["title"], "Custom title: WARN");
    assert_eq!(embed["description"], "Custom description: disk low");
    assert_eq!(embed["color"], 0xf1c40f);
    assert_eq!(embed["timestamp"], "2024-01-01T00:00:00Z");
    assert_eq!(embed["fields"][0]["inline"], true);
    assert_eq!(embed["footer"]["text"], "Custom Footer");
}

#[rstest]
fn clones_share_configuration() {
    let handler = build_handler(refused_url());
    let clone = handler.clone();
    assert_eq!(handler.config().url, clone.config().url);
    assert!(std::ptr::eq(handler.config(), clone.config()));
}
