//! Clip concatenation with ffmpeg.

use async_trait::async_trait;
use reelmaker_error::{CodecError, ReelResult, StorageError, StorageErrorKind};
use reelmaker_interface::ClipMerger;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

/// Longest stderr excerpt kept in a codec error.
const STDERR_TAIL_CHARS: usize = 2000;

/// Concatenates clips with the ffmpeg concat demuxer, re-encoding to
/// H.264/AAC.
#[derive(Debug, Clone)]
pub struct FfmpegMerger {
    binary: PathBuf,
}

impl Default for FfmpegMerger {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegMerger {
    /// Use the given ffmpeg executable.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The ffmpeg executable.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

/// Render an ffmpeg concat list for `clips`.
pub fn concat_list(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| {
            let escaped = clip.display().to_string().replace('\'', r"'\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}

#[async_trait]
impl ClipMerger for FfmpegMerger {
    #[instrument(skip(self, clips), fields(clip_count = clips.len(), output = %output.display()))]
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf> {
        let Some(first) = clips.first() else {
            return Err(CodecError::new("no clips to merge").into());
        };

        // The list lives beside the clips so it is cleaned up with them
        let list_path = first
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("concat.txt");
        tokio::fs::write(&list_path, concat_list(clips))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    list_path.display(),
                    e
                )))
            })?;
        debug!(list = %list_path.display(), "Concat list written");

        let result = Command::new(&self.binary)
            .arg("-y")
            .args(["-f", "concat", "-safe", "0", "-i"])
            .arg(&list_path)
            .args(["-c:v", "libx264", "-c:a", "aac"])
            .arg(output)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                error!(binary = %self.binary.display(), error = %e, "Failed to launch ffmpeg");
                StorageError::new(StorageErrorKind::ProcessSpawn(format!(
                    "{}: {}",
                    self.binary.display(),
                    e
                )))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail = tail_chars(&stderr, STDERR_TAIL_CHARS);
            error!(status = %result.status, "ffmpeg failed");
            return Err(CodecError::new(format!("ffmpeg exited with {}: {}", result.status, tail)).into());
        }

        info!(output = %output.display(), "Clips merged");
        Ok(output.to_path_buf())
    }
}

fn tail_chars(text: &str, max: usize) -> &str {
    let trimmed = text.trim_end();
    match trimmed.char_indices().rev().nth(max.saturating_sub(1)) {
        Some((index, _)) => &trimmed[index..],
        None => trimmed,
    }
}
