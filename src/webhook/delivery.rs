//! Blocking HTTP delivery of a single payload.
//!
//! One call, one request: there is no retry loop, no backoff and no queue.
//! The caller's thread blocks until the webhook answers or the timeout
//! elapses.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use ureq::{Agent, AgentBuilder};

use crate::handler::DeliveryError;

use super::payload::Payload;

/// Build the HTTP agent shared by every clone of a handler.
///
/// TLS goes through the platform's `native-tls` connector. Timeouts are set
/// per request rather than on the agent.
pub(crate) fn build_agent() -> Result<Agent, native_tls::Error> {
    let tls = native_tls::TlsConnector::new()?;
    Ok(AgentBuilder::new().tls_connector(Arc::new(tls)).build())
}

/// Map a response status to the delivery outcome.
///
/// Anything below 400 counts as delivered; the body is never inspected.
pub(crate) fn classify_status(status: u16) -> Result<(), DeliveryError> {
    if status >= 400 {
        Err(DeliveryError::Status(status))
    } else {
        Ok(())
    }
}

/// POST `payload` as JSON to `url`, waiting at most `timeout`.
///
/// # Errors
///
/// * [`DeliveryError::Serialize`] - the payload could not be encoded.
/// * [`DeliveryError::Request`] - `url` is not a usable request URL.
/// * [`DeliveryError::Transport`] - connecting, TLS, I/O or the timeout failed.
/// * [`DeliveryError::Status`] - the webhook answered with status 400 or above.
pub fn send(
    agent: &Agent,
    url: &str,
    payload: &Payload,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    let body = serde_json::to_string(payload)?;

    let request = agent
        .post(url)
        .timeout(timeout)
        .set("Content-Type", "application/json");
    request
        .request_url()
        .map_err(|err| DeliveryError::Request(err.to_string()))?;

    match request.send_string(&body) {
        Ok(response) => classify_status(response.status()),
        Err(ureq::Error::Status(code, _)) => {
            debug!(target: "discord_webhook_log", "webhook rejected payload with status {code}");
            classify_status(code)
        }
        Err(ureq::Error::Transport(err)) => Err(DeliveryError::Transport(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200)]
    #[case(204)]
    #[case(302)]
    #[case(399)]
    fn statuses_below_400_succeed(#[case] status: u16) {
        assert!(classify_status(status).is_ok());
    }

    #[rstest]
    #[case(400)]
    #[case(404)]
    #[case(429)]
    #[case(500)]
    #[case(503)]
    fn statuses_from_400_fail_with_code(#[case] status: u16) {
        match classify_status(status) {
            Err(DeliveryError::Status(code)) => assert_eq!(code, status),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_url_is_a_request_error() {
        let agent = build_agent().expect("tls connector");
        let payload = Payload::new(Default::default());
        let err = send(&agent, "not a url", &payload, Duration::from_secs(1))
            .expect_err("url must be rejected");
        assert!(matches!(err, DeliveryError::Request(_)), "got {err:?}");
    }
}
