//! Shared HTTP client setup.

use plugfetch_core::{FetchError, Result};
use reqwest::Client;

/// User agent sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("plugfetch/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used for feeds and downloads.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Network {
            url: String::new(),
            reason: format!("failed to build HTTP client: {}", e),
        })
}
