//! Clip downloading over HTTP.

use async_trait::async_trait;
use reelmaker_core::ArtifactReference;
use reelmaker_error::{
    ReelResult, StorageError, StorageErrorKind, TransportError, TransportErrorKind,
};
use reelmaker_interface::ClipDownloader;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Downloads artifacts with reqwest.
///
/// `file://` locators and bare paths are read from disk instead.
#[derive(Debug, Clone, Default)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a downloader sharing an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClipDownloader for HttpDownloader {
    #[instrument(skip_all, fields(source = %source, timeout_secs = timeout.as_secs()))]
    async fn download(&self, source: &ArtifactReference, timeout: Duration) -> ReelResult<Vec<u8>> {
        if !source.is_remote() {
            let Some(path) = source.to_file_path() else {
                return Err(TransportError::new(TransportErrorKind::Request(format!(
                    "unsupported locator: {}",
                    source
                )))
                .into());
            };
            return tokio::fs::read(&path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
                    .into()
            });
        }

        let response = self
            .client
            .get(source.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Download request failed");
                if e.is_timeout() {
                    TransportError::new(TransportErrorKind::Timeout(timeout.as_secs()))
                } else {
                    TransportError::new(TransportErrorKind::Request(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Download failed");
            return Err(TransportError::new(TransportErrorKind::Status {
                status_code: status.as_u16(),
                message: format!("failed to download {}", source),
            })
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::Request(e.to_string())))?;
        debug!(bytes = bytes.len(), "Downloaded");
        Ok(bytes.to_vec())
    }
}
