//! Release feed records as published by GitHub Releases.

use semver::Version;
use serde::{Deserialize, Serialize};

/// A published release entry from the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Git tag the release was cut from, usually the version.
    pub tag_name: String,

    /// Display name of the release.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the release is flagged as a prerelease.
    #[serde(default)]
    pub prerelease: bool,

    /// Downloadable files attached to the release.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// File name of the asset.
    pub name: String,

    /// Direct download URL.
    #[serde(rename = "browser_download_url")]
    pub url: String,

    /// Size in bytes, when the feed reports it.
    #[serde(default)]
    pub size: Option<u64>,
}

/// The asset selected for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// File name the asset is installed under.
    pub name: String,

    /// Download URL.
    pub url: String,

    /// Version of the release the asset belongs to.
    pub version: Version,

    /// Tag of the release the asset belongs to.
    pub tag: String,
}

impl Release {
    /// Creates a stable release with no assets.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: None,
            prerelease: false,
            assets: Vec::new(),
        }
    }

    /// Marks the release as a prerelease.
    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Attaches an asset.
    pub fn with_asset(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.assets.push(Asset {
            name: name.into(),
            url: url.into(),
            size: None,
        });
        self
    }

    /// Returns the version encoded in the tag, if it can be read as one.
    pub fn version(&self) -> Option<Version> {
        parse_tag(&self.tag_name)
    }

    /// Returns the first asset whose name ends with `suffix` (case-insensitive).
    pub fn asset_with_suffix(&self, suffix: &str) -> Option<&Asset> {
        let suffix = suffix.to_ascii_lowercase();
        self.assets
            .iter()
            .find(|a| a.name.to_ascii_lowercase().ends_with(&suffix))
    }
}

/// Reads a release tag as a semantic version.
///
/// Accepts an optional `v` prefix and pads missing minor/patch components
/// with zero, so `v1.2` reads as `1.2.0`.
pub fn parse_tag(tag: &str) -> Option<Version> {
    let tag = tag.trim();
    let raw = tag.strip_prefix(['v', 'V']).unwrap_or(tag);

    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }

    let split = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, rest) = raw.split_at(split);

    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, rest),
        2 => format!("{}.0{}", core, rest),
        _ => return None,
    };

    Version::parse(&padded).ok()
}
