//! Outbound adapters for the Gamma and GitHub REST APIs.

pub mod gamma;
pub mod github;

pub use gamma::GammaClient;
pub use github::GitHubClient;

use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::warn;

/// Shared HTTP client construction with configured timeouts.
///
/// GitHub rejects requests without a User-Agent, so one is always set.
pub(crate) fn build_http_client(timeout_ms: u64, connect_timeout_ms: u64) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .connect_timeout(Duration::from_millis(connect_timeout_ms))
        .user_agent(concat!("polyradar/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}
