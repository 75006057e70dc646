use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How a [`CaptureTimer::hold`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldOutcome {
    Elapsed,
    Cancelled,
}

/// Cancellable fixed-duration hold used for the recording window.
///
/// Nothing in the current CLI triggers cancellation; the token exists so the
/// hold is testable without wall-clock delays and so a future interrupt path
/// has somewhere to land.
#[derive(Clone, Debug, Default)]
pub struct CaptureTimer {
    cancel: CancellationToken,
}

impl CaptureTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that, once cancelled, resolves any in-flight or future hold.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn hold(&self, duration: Duration) -> HoldOutcome {
        tokio::select! {
            _ = tokio::time::sleep(duration) => HoldOutcome::Elapsed,
            _ = self.cancel.cancelled() => HoldOutcome::Cancelled,
        }
    }
}
