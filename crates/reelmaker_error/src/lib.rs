//! Error types for the Reelmaker pipeline.
//!
//! This crate provides the error taxonomy shared by every Reelmaker crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Stage adapters report [`TransportError`] when a remote stage could not be
//! reached and [`ModelError`] when it answered with something unusable.
//! The storyboard interpreter reports [`StoryboardError`] and the scene
//! orchestrator reports [`PipelineError`] for run-level failures.
//!
//! # Examples
//!
//! ```
//! use reelmaker_error::{ReelResult, TransportError, TransportErrorKind};
//!
//! fn fetch_frame() -> ReelResult<String> {
//!     Err(TransportError::new(TransportErrorKind::Request("connection refused".into())))?
//! }
//!
//! assert!(fetch_frame().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod codec;
mod config;
mod error;
mod json;
mod model;
mod pipeline;
mod retryable;
mod storage;
mod storyboard;
mod transport;
mod validation;

pub use builder::{BuilderError, BuilderErrorKind};
pub use codec::CodecError;
pub use config::ConfigError;
pub use error::{ReelError, ReelErrorKind, ReelResult};
pub use json::JsonError;
pub use model::ModelError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use retryable::RetryableError;
pub use storage::{StorageError, StorageErrorKind};
pub use storyboard::{StoryboardError, StoryboardErrorKind};
pub use transport::{TransportError, TransportErrorKind};
pub use validation::ValidationError;
