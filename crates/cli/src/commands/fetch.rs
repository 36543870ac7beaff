//! Fetch command implementation.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use miette::{Result, miette};
use plugfetch_core::{FetchError, PluginRegistry};
use plugfetch_engine::{
    DownloadProgress, Fetcher, FetchReport, GithubFeed, HttpDownloader, Installer, build_client,
};

use crate::output;

/// Environment variable holding an optional GitHub API token.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Arguments of a fetch invocation.
pub struct FetchRequest<'a> {
    pub plugin_id: Option<&'a str>,
    pub plugin_dir: &'a Path,
    pub match_version: &'a str,
    pub stable_only: bool,
}

/// Fetches a plugin into the plugin directory.
pub async fn execute(registry: PluginRegistry, request: FetchRequest<'_>) -> Result<()> {
    let plugin_id = request
        .plugin_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| miette!("{}", FetchError::MissingPluginId))?;

    // Parsed here so a bad expression is reported with its labelled source
    let match_version = request.match_version.trim();
    let matcher = if match_version.is_empty() {
        None
    } else {
        Some(plugfetch_parser::parse_match(match_version)?)
    };

    tracing::debug!(
        plugin = plugin_id,
        dir = %request.plugin_dir.display(),
        stable_only = request.stable_only,
        "fetching plugin"
    );

    let client = build_client().map_err(|e| miette!("{}", e))?;

    let bar = output::create_download_bar(&format!("Fetching {}", plugin_id));
    let started = AtomicBool::new(false);
    let progress_bar = bar.clone();
    let downloader = HttpDownloader::new(client.clone()).with_progress(Arc::new(
        move |progress: DownloadProgress| {
            if !started.swap(true, Ordering::Relaxed) {
                output::start_transfer(&progress_bar, progress.total);
            }
            progress_bar.set_position(progress.downloaded);
        },
    ));

    let feed = GithubFeed::new(client).with_token(std::env::var(TOKEN_ENV).ok());
    let installer = Installer::new(downloader, request.plugin_dir);
    let fetcher = Fetcher::new(registry, feed, installer);

    let result = fetcher
        .fetch(plugin_id, matcher, request.stable_only)
        .await;

    bar.finish_and_clear();

    let report = result.map_err(|e| miette!("{}", e))?;
    print_report(&report);

    Ok(())
}

fn print_report(report: &FetchReport) {
    for dir in &report.install.skipped_directories {
        output::warning(&format!(
            "`{}` is a directory; will not remove this, but please inspect.",
            dir.display()
        ));
    }

    if let Some(removed) = &report.install.removed {
        output::info(&format!(
            "Removed existing {} plugin {}",
            report.plugin_id,
            removed.display()
        ));
    }

    output::success(&format!(
        "Installed {} {} ({})",
        report.plugin_id, report.asset.version, report.asset.name
    ));
    output::key_value("path", &report.install.installed.display().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_plugin_id() {
        let dir = tempdir().unwrap();
        let request = FetchRequest {
            plugin_id: None,
            plugin_dir: dir.path(),
            match_version: "",
            stable_only: false,
        };

        let err = execute(PluginRegistry::builtin(), request).await.unwrap_err();
        assert!(err.to_string().contains("--plugin-id"));
    }

    #[tokio::test]
    async fn test_unknown_plugin_lists_known_ids() {
        let dir = tempdir().unwrap();
        let request = FetchRequest {
            plugin_id: Some("not.a.plugin"),
            plugin_dir: dir.path(),
            match_version: "",
            stable_only: false,
        };

        let err = execute(PluginRegistry::builtin(), request).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not.a.plugin"));
        assert!(message.contains("yaml.config.plugin"));
        assert!(message.contains("json.config.plugin"));
    }

    #[tokio::test]
    async fn test_bad_expression_is_diagnostic() {
        let dir = tempdir().unwrap();
        let request = FetchRequest {
            plugin_id: Some("yaml.config.plugin"),
            plugin_dir: dir.path(),
            match_version: "~1.0",
            stable_only: false,
        };

        let err = execute(PluginRegistry::builtin(), request).await.unwrap_err();
        assert!(err.to_string().contains("Invalid version match expression"));
        assert!(err.downcast_ref::<plugfetch_parser::ParseError>().is_some());
    }
}
