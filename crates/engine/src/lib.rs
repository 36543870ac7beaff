//! Plugfetch Engine - release resolution and plugin installation.

mod download;
mod feed;
mod fetcher;
mod http;
mod installer;
mod lookup;
mod resolver;

#[cfg(test)]
mod test_server;

pub use download::{DownloadProgress, Downloader, HttpDownloader, ProgressCallback};
pub use feed::{GithubFeed, ReleaseFeed, parse_releases};
pub use fetcher::{FetchReport, Fetcher};
pub use http::{USER_AGENT, build_client};
pub use installer::{InstallReport, Installer};
pub use lookup::{InstalledPlugin, Lookup, PARTIAL_SUFFIX, find_installed};
pub use resolver::{ResolveOptions, resolve};
