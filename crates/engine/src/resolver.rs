//! Picks the release asset to install from a release feed.

use std::cmp::Ordering;

use plugfetch_core::{
    DEFAULT_ASSET_SUFFIX, FetchError, Release, ResolvedAsset, Result, VersionMatch,
};
use semver::Version;

/// How a release is chosen from the feed.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Parsed match expression; `None` selects the latest release.
    pub matcher: Option<VersionMatch>,

    /// Skip releases flagged as prerelease.
    pub stable_only: bool,

    /// Suffix the selected asset's name must end with.
    pub asset_suffix: String,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self {
            matcher: None,
            stable_only: false,
            asset_suffix: DEFAULT_ASSET_SUFFIX.to_string(),
        }
    }

    /// Sets the match expression.
    pub fn with_matcher(mut self, matcher: Option<VersionMatch>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Restricts resolution to stable releases.
    pub fn with_stable_only(mut self, stable_only: bool) -> Self {
        self.stable_only = stable_only;
        self
    }

    /// Sets the required asset suffix.
    pub fn with_asset_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.asset_suffix = suffix.into();
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the single asset to install for `plugin_id`.
///
/// Among releases that pass the stability filter and the match expression,
/// the one with the highest semver precedence wins; on equal precedence the earlier
/// entry in feed order is kept. The winner must carry an asset ending in the
/// configured suffix, otherwise resolution fails.
pub fn resolve(
    plugin_id: &str,
    releases: &[Release],
    options: &ResolveOptions,
) -> Result<ResolvedAsset> {
    if releases.is_empty() {
        return Err(FetchError::NoReleasesAvailable(plugin_id.to_string()));
    }

    let mut best: Option<(Version, &Release)> = None;

    for release in releases {
        if options.stable_only && release.prerelease {
            continue;
        }

        let Some(version) = release.version() else {
            tracing::debug!(tag = %release.tag_name, "skipping release with unreadable version");
            continue;
        };

        if let Some(matcher) = &options.matcher {
            if !matcher.matches(&version) {
                continue;
            }
        }

        let better = match &best {
            Some((current, _)) => version.cmp_precedence(current) == Ordering::Greater,
            None => true,
        };

        if better {
            best = Some((version, release));
        }
    }

    let (version, release) = best.ok_or_else(|| FetchError::NoMatchingVersion {
        filter: options
            .matcher
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        stable_only: options.stable_only,
    })?;

    tracing::debug!(plugin = plugin_id, tag = %release.tag_name, %version, "selected release");

    let asset = release
        .asset_with_suffix(&options.asset_suffix)
        .ok_or_else(|| FetchError::NoMatchingAsset {
            tag: release.tag_name.clone(),
            suffix: options.asset_suffix.clone(),
        })?;

    Ok(ResolvedAsset {
        name: asset.name.clone(),
        url: asset.url.clone(),
        version,
        tag: release.tag_name.clone(),
    })
}
