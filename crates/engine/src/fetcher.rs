//! End-to-end fetch: registry lookup, release feed, resolution, installation.

use plugfetch_core::{FetchError, PluginRegistry, ResolvedAsset, Result, VersionMatch};

use crate::download::Downloader;
use crate::feed::ReleaseFeed;
use crate::installer::{InstallReport, Installer};
use crate::resolver::{self, ResolveOptions};

/// Fetches plugins named in a registry.
pub struct Fetcher<F, D> {
    registry: PluginRegistry,
    feed: F,
    installer: Installer<D>,
}

/// Fetch report.
#[derive(Debug)]
pub struct FetchReport {
    /// Plugin that was fetched.
    pub plugin_id: String,

    /// Asset that was selected.
    pub asset: ResolvedAsset,

    /// Changes made to the plugin directory.
    pub install: InstallReport,
}

impl<F: ReleaseFeed, D: Downloader> Fetcher<F, D> {
    pub fn new(registry: PluginRegistry, feed: F, installer: Installer<D>) -> Self {
        Self {
            registry,
            feed,
            installer,
        }
    }

    /// Resolves and installs `plugin_id`.
    ///
    /// The plugin id is validated before any request is made. `matcher` is
    /// the parsed `--match-version` expression, if one was given.
    pub async fn fetch(
        &self,
        plugin_id: &str,
        matcher: Option<VersionMatch>,
        stable_only: bool,
    ) -> Result<FetchReport> {
        let plugin_id = plugin_id.trim();
        if plugin_id.is_empty() {
            return Err(FetchError::MissingPluginId);
        }

        let entry = self.registry.get(plugin_id)?;

        let options = ResolveOptions::new()
            .with_matcher(matcher)
            .with_stable_only(stable_only)
            .with_asset_suffix(entry.asset_suffix());

        let releases = self.feed.releases(&entry.url).await?;
        let asset = resolver::resolve(plugin_id, &releases, &options)?;
        let install = self.installer.install(entry, &asset).await?;

        Ok(FetchReport {
            plugin_id: plugin_id.to_string(),
            asset,
            install,
        })
    }
}
