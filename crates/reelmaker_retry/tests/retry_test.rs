//! Retry behaviour for operations and wrapped stages.

use async_trait::async_trait;
use reelmaker_core::ArtifactReference;
use reelmaker_error::{
    ModelError, ReelResult, TransportError, TransportErrorKind, ValidationError,
};
use reelmaker_interface::FrameExtractor;
use reelmaker_retry::{RetryPolicy, Retrying, retry_operation};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fails a fixed number of times before succeeding.
struct FlakyFrames {
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyFrames {
    fn failing(times: usize) -> Self {
        Self {
            failures_left: AtomicUsize::new(times),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameExtractor for FlakyFrames {
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(TransportError::new(TransportErrorKind::Status {
                status_code: 503,
                message: "overloaded".to_string(),
            })
            .into());
        }
        ArtifactReference::parse(format!("{}.png", video))
    }
}

fn video() -> ArtifactReference {
    ArtifactReference::parse("https://video.test/scene-2.mp4").unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_are_retried() -> anyhow::Result<()> {
    let frames = Retrying::new(FlakyFrames::failing(2), RetryPolicy::default());

    let frame = frames.extract_frame(&video()).await?;

    assert_eq!(frame.as_str(), "https://video.test/scene-2.mp4.png");
    assert_eq!(frames.inner().calls(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_attempts_are_bounded_by_policy() {
    let frames = Retrying::new(FlakyFrames::failing(10), RetryPolicy::default());

    let err = frames
        .extract_frame(&video())
        .await
        .expect_err("three attempts are not enough");

    assert!(err.to_string().contains("overloaded"));
    assert_eq!(frames.inner().calls(), 3);
}

#[tokio::test]
async fn test_disabled_policy_makes_one_attempt() {
    let frames = Retrying::new(FlakyFrames::failing(1), RetryPolicy::disabled());

    assert!(frames.extract_frame(&video()).await.is_err());
    assert_eq!(frames.inner().calls(), 1);
}

#[tokio::test]
async fn test_permanent_errors_are_not_retried() {
    let calls = AtomicUsize::new(0);

    let result: ReelResult<()> = retry_operation(&RetryPolicy::default(), "validate", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(ValidationError::new("bad locator").into()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_auth_failures_are_not_retried() {
    let calls = AtomicUsize::new(0);

    let result: ReelResult<()> = retry_operation(&RetryPolicy::default(), "auth", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(TransportError::new(TransportErrorKind::Auth("bad token".into())).into()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_stops_at_first_permanent_error() {
    let calls = AtomicUsize::new(0);

    let result: ReelResult<()> = retry_operation(&RetryPolicy::default(), "mixed", || {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt == 0 {
                Err(ModelError::new("empty output").into())
            } else {
                Err(ValidationError::new("unusable").into())
            }
        }
    })
    .await;

    assert!(result.unwrap_err().to_string().contains("unusable"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_policy_deserializes_with_defaults() {
    let policy: RetryPolicy = policy_from_toml("max_attempts = 5");
    assert_eq!(*policy.max_attempts(), 5);
    assert_eq!(*policy.initial_backoff_ms(), 2000);
    assert!(*policy.enabled());
    assert_eq!(policy.retries(), 4);
}

fn policy_from_toml(toml_text: &str) -> RetryPolicy {
    toml::from_str(toml_text).expect("valid policy")
}
