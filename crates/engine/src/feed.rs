//! Release feeds: where the list of published releases comes from.

use std::future::Future;

use plugfetch_core::{FetchError, Release, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;

/// Source of releases for a plugin.
pub trait ReleaseFeed {
    /// Fetches all releases published at `url`, in feed order.
    fn releases(&self, url: &str) -> impl Future<Output = Result<Vec<Release>>> + Send;
}

/// Release feed backed by the GitHub releases API.
pub struct GithubFeed {
    client: Client,
    token: Option<String>,
}

impl GithubFeed {
    /// Creates a feed using the given client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            token: None,
        }
    }

    /// Sets the token sent to api.github.com.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// The token is only attached to GitHub API requests.
    fn token_for(&self, url: &str) -> Option<&str> {
        let host_is_github = reqwest::Url::parse(url)
            .map(|u| u.host_str() == Some("api.github.com"))
            .unwrap_or(false);

        if host_is_github {
            self.token.as_deref()
        } else {
            None
        }
    }
}

impl ReleaseFeed for GithubFeed {
    async fn releases(&self, url: &str) -> Result<Vec<Release>> {
        tracing::debug!(url, "requesting releases");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(token) = self.token_for(url) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: format!("reading response: {}", e),
        })?;

        parse_releases(url, &body)
    }
}

/// Parses a release feed body.
pub fn parse_releases(url: &str, body: &[u8]) -> Result<Vec<Release>> {
    let releases: Vec<Release> =
        serde_json::from_slice(body).map_err(|e| FetchError::InvalidFeed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(url, count = releases.len(), "parsed release feed");
    Ok(releases)
}
