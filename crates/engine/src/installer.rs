//! Replacing an installed plugin with a resolved asset.

use std::path::{Component, Path, PathBuf};

use plugfetch_core::{FetchError, PluginRegistryEntry, ResolvedAsset, Result};

use crate::download::Downloader;
use crate::lookup::{self, InstalledPlugin, PARTIAL_SUFFIX};

/// Installs assets into a plugin directory.
pub struct Installer<D> {
    /// Downloader used to fetch asset content.
    downloader: D,

    /// Directory plugins are installed into.
    plugin_dir: PathBuf,
}

/// What an installation changed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Path of the newly installed plugin.
    pub installed: PathBuf,

    /// Previously installed file that was removed.
    pub removed: Option<PathBuf>,

    /// Directories matching the plugin that were left in place.
    pub skipped_directories: Vec<PathBuf>,

    /// Size of the downloaded asset.
    pub bytes: u64,
}

impl<D: Downloader> Installer<D> {
    pub fn new(downloader: D, plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloader,
            plugin_dir: plugin_dir.into(),
        }
    }

    /// Installs `asset` for the plugin described by `entry`.
    ///
    /// The asset is downloaded next to its final location first; an existing
    /// installed file is only removed once the download has completed, so a
    /// failed download leaves the previous installation in place. Directories
    /// matching the plugin are never removed.
    pub async fn install(
        &self,
        entry: &PluginRegistryEntry,
        asset: &ResolvedAsset,
    ) -> Result<InstallReport> {
        validate_asset_name(&asset.name)?;

        let existing = lookup::find_installed(&self.plugin_dir, entry)?;

        tokio::fs::create_dir_all(&self.plugin_dir).await?;

        let target = self.plugin_dir.join(&asset.name);
        let partial = self
            .plugin_dir
            .join(format!("{}{}", asset.name, PARTIAL_SUFFIX));

        let bytes = match self.downloader.download(&asset.url, &partial).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    tracing::debug!(path = %partial.display(), error = %cleanup, "no partial download to clean up");
                }
                return Err(e);
            }
        };

        for path in &existing.directories {
            tracing::debug!(plugin = %entry.id, path = %path.display(), "leaving plugin directory in place");
        }

        let mut report = InstallReport {
            installed: target.clone(),
            removed: None,
            skipped_directories: existing.directories,
            bytes,
        };

        if let InstalledPlugin::File(path) = existing.installed {
            tracing::info!(plugin = %entry.id, path = %path.display(), "removing existing plugin");
            tokio::fs::remove_file(&path).await?;
            report.removed = Some(path);
        }

        tokio::fs::rename(&partial, &target).await?;

        tracing::info!(plugin = %entry.id, path = %target.display(), bytes, "installed plugin");
        Ok(report)
    }
}

/// Asset names become file names; they must not escape the plugin directory.
fn validate_asset_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !single_normal || name.contains('\\') || name.starts_with('.') {
        return Err(FetchError::InvalidAssetName(name.to_string()));
    }

    Ok(())
}
