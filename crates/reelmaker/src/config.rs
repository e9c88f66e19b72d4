//! Layered configuration.
//!
//! Settings are merged from, lowest precedence first:
//! - Bundled defaults (include_str! from reelmaker.toml)
//! - `~/.config/reelmaker/reelmaker.toml`
//! - `./reelmaker.toml`, or an explicit file passed with `--config`
//! - `REELMAKER__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use reelmaker_core::SamplingParams;
use reelmaker_error::{ConfigError, ReelError, ReelResult};
use reelmaker_models::ReplicateSettings;
use reelmaker_pipeline::{Expansion, ExpansionSet};
use reelmaker_retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../../reelmaker.toml");

/// Sampling for each text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SamplingConfig {
    /// Storyboard interpretation
    storyboard: SamplingParams,
    /// Character prompt expansion
    character: SamplingParams,
    /// Setting prompt expansion
    setting: SamplingParams,
    /// Scene 1 combination prompt
    combine: SamplingParams,
}

impl SamplingConfig {
    /// Expansion settings for the scene pipeline.
    pub fn expansions(&self) -> ExpansionSet {
        ExpansionSet {
            character: Expansion::character().with_sampling(self.character),
            setting: Expansion::setting().with_sampling(self.setting),
            combine: Expansion::combine().with_sampling(self.combine),
        }
    }
}

/// Where run output goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OutputConfig {
    /// Root directory for merged reels
    directory: PathBuf,
    /// File name of the merged reel
    merged_file_name: String,
    /// Per-segment download timeout
    download_timeout_secs: u64,
}

impl OutputConfig {
    /// Path of the merged reel for one run.
    pub fn reel_path(&self, run_id: &str) -> PathBuf {
        self.directory.join(run_id).join(&self.merged_file_name)
    }

    /// Download timeout as a duration.
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Clip merge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MergeConfig {
    /// ffmpeg executable
    ffmpeg: PathBuf,
}

/// Complete Reelmaker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ReelConfig {
    /// Replicate API and models
    replicate: ReplicateSettings,
    /// Text-generation sampling
    sampling: SamplingConfig,
    /// Caller-side retries
    retry: RetryPolicy,
    /// Output locations
    output: OutputConfig,
    /// Clip merging
    merge: MergeConfig,
}

impl ReelConfig {
    /// Load configuration with the standard precedence.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any source is malformed.
    pub fn load() -> ReelResult<Self> {
        Self::load_with(None)
    }

    /// Load configuration, using `path` in place of `./reelmaker.toml`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `path` is missing or any source is
    /// malformed.
    pub fn load_with(path: Option<&Path>) -> ReelResult<Self> {
        debug!(explicit = ?path, "Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reelmaker").join("reelmaker.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("reelmaker").required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("REELMAKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                ReelError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ReelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Parse configuration from TOML text layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is malformed.
    pub fn from_toml(text: &str) -> ReelResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                ReelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
