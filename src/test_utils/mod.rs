//! Helpers shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and for the `test-util` feature so the
//! integration tests under `tests/` can reach them.

pub mod collecting_handler;
pub mod mock_webhook;

pub use collecting_handler::CollectingHandler;
pub use mock_webhook::{CapturedRequest, MockResponse, MockWebhook, refused_url};
