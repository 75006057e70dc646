use crate::error::CaptureResult;

/// Narrow capability interface over the live presentation page.
///
/// The traversal and capture-decision logic only ever needs three verbs, so
/// this is the whole seam between the core and whichever automation transport
/// backs it (CDP in production, scripted doubles in tests).
#[async_trait::async_trait]
pub trait DeckPage: Send + Sync {
    /// Evaluate a script in the page and return its JSON result.
    async fn eval(&self, script: &str) -> CaptureResult<serde_json::Value>;

    /// Dispatch one key press (keydown + keyup) through the page's own input
    /// handling.
    async fn press_key(&self, key: &str) -> CaptureResult<()>;

    /// Capture the current viewport as PNG bytes.
    async fn screenshot(&self) -> CaptureResult<Vec<u8>>;
}
