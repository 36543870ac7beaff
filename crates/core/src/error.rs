//! Error types for plugfetch.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for plugfetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Main error type for plugfetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("You must provide a --plugin-id")]
    MissingPluginId,

    #[error("Don't know how to fetch plugin `{id}`; known plugins: {known}")]
    UnknownPluginId { id: String, known: String },

    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Invalid release feed from {url}: {reason}")]
    InvalidFeed { url: String, reason: String },

    #[error("There are no available releases for {0}")]
    NoReleasesAvailable(String),

    #[error("No matching release for {}", describe_filter(.filter, .stable_only))]
    NoMatchingVersion { filter: String, stable_only: bool },

    #[error("Release {tag} has no asset ending in `{suffix}`")]
    NoMatchingAsset { tag: String, suffix: String },

    #[error("Invalid version match expression `{expression}` at offset {offset}: {message}")]
    InvalidMatchExpression {
        expression: String,
        message: String,
        offset: usize,
    },

    #[error("Failed searching for installed plugin in {dir}")]
    PluginLookup {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to install asset with unsafe name `{0}`")]
    InvalidAssetName(String),

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Invalid plugin registry {path}: {reason}")]
    Registry { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_filter(filter: &str, stable_only: &bool) -> String {
    let kind = if *stable_only { "stable " } else { "" };

    if filter.trim().is_empty() {
        format!("latest {}version", kind)
    } else {
        format!("{}version matching `{}`", kind, filter)
    }
}
