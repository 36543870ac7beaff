//! Streaming asset downloads.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use plugfetch_core::{FetchError, Result};
use reqwest::Client;
use tokio::io::AsyncWriteExt;

/// Progress of a running download.
#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    /// Bytes written so far.
    pub downloaded: u64,

    /// Total size, when the server reports it.
    pub total: Option<u64>,
}

/// Callback invoked as download chunks are written.
pub type ProgressCallback = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// Fetches the content at a URL into a local file.
pub trait Downloader {
    /// Writes the body at `url` to `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> impl Future<Output = Result<u64>> + Send;
}

/// Downloader over HTTP(S).
pub struct HttpDownloader {
    client: Client,
    progress: Option<ProgressCallback>,
}

impl HttpDownloader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            progress: None,
        }
    }

    /// Reports progress through `callback`.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }
}

impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let download_err = |reason: String| FetchError::Download {
            url: url.to_string(),
            reason,
        };

        tracing::debug!(url, dest = %dest.display(), "downloading");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_err(format!("HTTP {}", status)));
        }

        let total = response.content_length();
        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| download_err(e.to_string()))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(progress) = &self.progress {
                progress(DownloadProgress { downloaded, total });
            }
        }

        file.flush().await?;

        if let Some(expected) = total {
            if downloaded != expected {
                return Err(download_err(format!(
                    "expected {} bytes, received {}",
                    expected, downloaded
                )));
            }
        }

        Ok(downloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use tempfile::tempdir;

    use crate::test_server::{client, http_response, serve_once};

    #[tokio::test]
    async fn test_download_writes_body_and_reports_progress() {
        let (base, _server) = serve_once(http_response("200 OK", 9, "jar-bytes")).await;
        let dir = tempdir().unwrap();
        let dest = dir.path().join("plugin.jar.part");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let downloader = HttpDownloader::new(client()).with_progress(Arc::new(
            move |progress: DownloadProgress| {
                recorder.lock().unwrap().push((progress.downloaded, progress.total));
            },
        ));

        let bytes = downloader
            .download(&format!("{}/plugin.jar", base), &dest)
            .await
            .unwrap();

        assert_eq!(bytes, 9);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "jar-bytes");
        assert_eq!(seen.lock().unwrap().last(), Some(&(9, Some(9))));
    }

    #[tokio::test]
    async fn test_error_status_is_download_error() {
        let (base, _server) = serve_once(http_response("404 Not Found", 0, "")).await;
        let dir = tempdir().unwrap();
        let dest = dir.path().join("plugin.jar.part");

        let err = HttpDownloader::new(client())
            .download(&format!("{}/missing.jar", base), &dest)
            .await
            .unwrap_err();

        match err {
            FetchError::Download { reason, .. } => assert!(reason.contains("404"), "{}", reason),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_truncated_body_is_download_error() {
        let (base, _server) = serve_once(http_response("200 OK", 100, "short")).await;
        let dir = tempdir().unwrap();
        let dest = dir.path().join("plugin.jar.part");

        let err = HttpDownloader::new(client())
            .download(&format!("{}/plugin.jar", base), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Download { .. }), "{:?}", err);
    }
}
