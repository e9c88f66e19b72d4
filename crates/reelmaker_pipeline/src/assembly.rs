//! Final merge of scene segments into one reel.

use crate::Segment;
use reelmaker_core::ArtifactReference;
use reelmaker_error::{
    PipelineError, PipelineErrorKind, ReelResult, StorageError, StorageErrorKind,
};
use reelmaker_interface::{ClipDownloader, ClipMerger};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default per-segment download timeout.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads segments into a scratch directory and merges them.
///
/// Every downloaded clip lives in a temporary directory owned by a single
/// [`merge`](MergeAssembler::merge) call. The directory is removed when the
/// call returns, whether the merge succeeded, a download failed part way, or
/// the merger itself failed.
#[derive(Clone)]
pub struct MergeAssembler {
    downloader: Arc<dyn ClipDownloader>,
    merger: Arc<dyn ClipMerger>,
    download_timeout: Duration,
    output_path: PathBuf,
    scratch_root: Option<PathBuf>,
}

impl MergeAssembler {
    /// Create an assembler writing the merged reel to `output_path`.
    pub fn new(
        downloader: Arc<dyn ClipDownloader>,
        merger: Arc<dyn ClipMerger>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            downloader,
            merger,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            output_path: output_path.into(),
            scratch_root: None,
        }
    }

    /// Override the per-segment download timeout.
    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Where the merged reel is written.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Merge segments, in the order given, into one local artifact.
    ///
    /// # Errors
    ///
    /// Fails with a pipeline error when fewer than two segments are given,
    /// and otherwise with whatever the download, file write or merge step
    /// reported.
    #[instrument(skip(self, segments), fields(segment_count = segments.len(), output = %self.output_path.display()))]
    pub async fn merge(&self, segments: &[Segment]) -> ReelResult<ArtifactReference> {
        if segments.len() < 2 {
            return Err(PipelineError::new(PipelineErrorKind::InsufficientSegments {
                produced: segments.len(),
            })
            .into());
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("reelmaker-merge-");
        let workdir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| StorageError::new(StorageErrorKind::DirectoryCreation(e.to_string())))?;

        let mut clips = Vec::with_capacity(segments.len());
        for segment in segments {
            let bytes = self
                .downloader
                .download(segment.video(), self.download_timeout)
                .await?;
            let path = workdir
                .path()
                .join(format!("segment_{:02}.mp4", segment.scene()));
            tokio::fs::write(&path, &bytes).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            debug!(scene = segment.scene(), bytes = bytes.len(), "Segment downloaded");
            clips.push(path);
        }

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let written = self.merger.merge(&clips, &self.output_path).await?;
        info!(output = %written.display(), "Segments merged");
        ArtifactReference::from_path(&written)
    }
}
