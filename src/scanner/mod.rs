//! Client-side scanning session.
//!
//! The camera and the barcode decoder sit behind [`FrameSource`]; this
//! module owns the sampling loop and its lifecycle. A session reports the
//! first decoded payload exactly once, and the camera is released on every
//! exit path: decode, explicit stop, dropped stop handle, camera failure.
//! Malformed payloads are classified locally; the server is never contacted
//! for them.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::checkin::token;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
}

/// A camera feed plus decoder. `next_decode` yields `Ok(None)` for a frame
/// with no readable barcode and `Ok(Some(payload))` for a decoded one.
#[async_trait]
pub trait FrameSource: Send {
    async fn acquire(&mut self) -> Result<(), CameraError>;
    async fn next_decode(&mut self) -> Result<Option<String>, CameraError>;
    async fn release(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Parsed check-in token, ready to submit to the validator.
    Token(String),
    /// Decoded payload that is not a check-in URI, reported locally.
    InvalidFormat(String),
    Cancelled,
    PermissionDenied,
    CameraFailed(String),
}

#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.0.send(true);
    }
}

pub fn stop_channel() -> (StopHandle, watch::Receiver<bool>) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), rx)
}

/// One scanning session: sample until the first decoded payload, a stop, or
/// a camera failure.
pub async fn run<S: FrameSource>(mut source: S, mut stop: watch::Receiver<bool>) -> ScanOutcome {
    if let Err(err) = source.acquire().await {
        return outcome_for(err);
    }

    let outcome = loop {
        tokio::select! {
            changed = stop.changed() => match changed {
                Ok(()) if *stop.borrow() => break ScanOutcome::Cancelled,
                Ok(()) => continue,
                // Stop handle dropped: the surrounding view is gone.
                Err(_) => break ScanOutcome::Cancelled,
            },
            decoded = source.next_decode() => match decoded {
                Ok(Some(payload)) => break match token::parse(&payload) {
                    Ok(t) => ScanOutcome::Token(t.to_string()),
                    Err(_) => ScanOutcome::InvalidFormat(payload),
                },
                // An unreadable frame is not an error; keep sampling.
                Ok(None) => tokio::task::yield_now().await,
                Err(err) => break outcome_for(err),
            },
        }
    };

    source.release().await;
    outcome
}

fn outcome_for(err: CameraError) -> ScanOutcome {
    match err {
        CameraError::PermissionDenied => ScanOutcome::PermissionDenied,
        CameraError::Unavailable(msg) => ScanOutcome::CameraFailed(msg),
    }
}

/// Per-device scanning state. A permission denial is terminal: the scanner
/// stays disabled until the user explicitly re-enables it.
#[derive(Debug, Default)]
pub struct Scanner {
    disabled: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Explicit user retry after a permission denial.
    pub fn reset(&mut self) {
        self.disabled = false;
    }

    pub async fn scan<S: FrameSource>(
        &mut self,
        source: S,
        stop: watch::Receiver<bool>,
    ) -> ScanOutcome {
        if self.disabled {
            return ScanOutcome::PermissionDenied;
        }

        let outcome = run(source, stop).await;
        if outcome == ScanOutcome::PermissionDenied {
            self.disabled = true;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted camera: plays back a fixed sequence of decode attempts,
    /// then pends forever.
    struct ScriptedSource {
        acquire_result: Result<(), CameraError>,
        steps: VecDeque<Result<Option<String>, CameraError>>,
        acquired: Arc<AtomicUsize>,
        released: Arc<AtomicBool>,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Result<Option<String>, CameraError>>) -> (Self, Arc<AtomicBool>) {
            let released = Arc::new(AtomicBool::new(false));
            let source = Self {
                acquire_result: Ok(()),
                steps: steps.into(),
                acquired: Arc::new(AtomicUsize::new(0)),
                released: released.clone(),
            };
            (source, released)
        }

        fn denied() -> (Self, Arc<AtomicUsize>) {
            let acquired = Arc::new(AtomicUsize::new(0));
            let source = Self {
                acquire_result: Err(CameraError::PermissionDenied),
                steps: VecDeque::new(),
                acquired: acquired.clone(),
                released: Arc::new(AtomicBool::new(false)),
            };
            (source, acquired)
        }
    }

    #[async_trait]
    impl FrameSource for ScriptedSource {
        async fn acquire(&mut self) -> Result<(), CameraError> {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            self.acquire_result.clone()
        }

        async fn next_decode(&mut self) -> Result<Option<String>, CameraError> {
            match self.steps.pop_front() {
                Some(step) => step,
                None => std::future::pending().await,
            }
        }

        async fn release(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn reports_first_decode_and_releases_camera() {
        let payload = token::issue("4b8c5ad4");
        let (source, released) = ScriptedSource::new(vec![
            Ok(None),
            Ok(None),
            Ok(Some(payload)),
            Ok(Some(token::issue("ignored-second-decode"))),
        ]);
        let (_stop, rx) = stop_channel();

        let outcome = run(source, rx).await;

        assert_eq!(outcome, ScanOutcome::Token("4b8c5ad4".to_string()));
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_local_error() {
        let (source, released) =
            ScriptedSource::new(vec![Ok(Some("garbage-not-a-uri".to_string()))]);
        let (_stop, rx) = stop_channel();

        let outcome = run(source, rx).await;

        assert_eq!(
            outcome,
            ScanOutcome::InvalidFormat("garbage-not-a-uri".to_string())
        );
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn explicit_stop_cancels_and_releases_camera() {
        // No decodable frames ever arrive.
        let (source, released) = ScriptedSource::new(vec![]);
        let (stop, rx) = stop_channel();

        let session = tokio::spawn(run(source, rx));
        stop.stop();

        assert_eq!(session.await.unwrap(), ScanOutcome::Cancelled);
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn dropped_stop_handle_cancels_the_session() {
        let (source, released) = ScriptedSource::new(vec![]);
        let (stop, rx) = stop_channel();
        drop(stop);

        assert_eq!(run(source, rx).await, ScanOutcome::Cancelled);
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn camera_failure_mid_session_releases_camera() {
        let (source, released) = ScriptedSource::new(vec![
            Ok(None),
            Err(CameraError::Unavailable("device lost".to_string())),
        ]);
        let (_stop, rx) = stop_channel();

        let outcome = run(source, rx).await;

        assert_eq!(outcome, ScanOutcome::CameraFailed("device lost".to_string()));
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn permission_denial_disables_scanner_until_reset() {
        let mut scanner = Scanner::new();

        let (source, acquired) = ScriptedSource::denied();
        let (_stop, rx) = stop_channel();
        assert_eq!(scanner.scan(source, rx).await, ScanOutcome::PermissionDenied);
        assert!(scanner.is_disabled());
        assert_eq!(acquired.load(Ordering::SeqCst), 1);

        // While disabled, the camera is not touched at all.
        let (source, acquired) = ScriptedSource::denied();
        let (_stop, rx) = stop_channel();
        assert_eq!(scanner.scan(source, rx).await, ScanOutcome::PermissionDenied);
        assert_eq!(acquired.load(Ordering::SeqCst), 0);

        scanner.reset();
        assert!(!scanner.is_disabled());

        let payload = token::issue("4b8c5ad4");
        let (source, _released) = ScriptedSource::new(vec![Ok(Some(payload))]);
        let (_stop, rx) = stop_channel();
        assert_eq!(
            scanner.scan(source, rx).await,
            ScanOutcome::Token("4b8c5ad4".to_string())
        );
    }
}
