use anyhow::Context as _;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType},
    cdp::browser_protocol::page::CaptureScreenshotFormat,
    page::{Page, ScreenshotParams},
};
use futures::StreamExt as _;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    error::{CaptureError, CaptureResult},
    page::DeckPage,
};

/// A launched Chromium instance plus the spawned task driving its CDP event
/// loop. Owns the browser for the session's entire duration.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium. Headed by default — animated media only plays in a
    /// rendering browser, and the operator usually wants to watch the run.
    pub async fn launch(headless: bool, width: u32, height: u32) -> CaptureResult<Self> {
        let mut builder = BrowserConfig::builder().window_size(width, height);
        if !headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| CaptureError::navigation(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CaptureError::navigation(format!("failed to launch browser: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless, width, height, "browser launched");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a new page on the presentation URL and wait for it to load.
    pub async fn open(&self, url: &str) -> CaptureResult<CdpDeckPage> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| CaptureError::navigation(format!("failed to open '{url}': {e}")))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| CaptureError::navigation(format!("navigation to '{url}' failed: {e}")))?;

        info!(url, "presentation loaded");
        Ok(CdpDeckPage { page })
    }

    pub async fn close(mut self) -> CaptureResult<()> {
        self.browser.close().await.context("close browser")?;
        self.browser.wait().await.context("wait for browser exit")?;
        let _ = self.handler_task.await;
        debug!("browser closed");
        Ok(())
    }
}

/// [`DeckPage`] over a live chromiumoxide page.
#[derive(Clone)]
pub struct CdpDeckPage {
    page: Page,
}

#[async_trait::async_trait]
impl DeckPage for CdpDeckPage {
    async fn eval(&self, script: &str) -> CaptureResult<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| CaptureError::query(format!("script evaluation failed: {e}")))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn press_key(&self, key: &str) -> CaptureResult<()> {
        for event_type in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
            let mut builder = DispatchKeyEventParams::builder()
                .r#type(event_type)
                .key(key.to_string())
                .code(key.to_string());

            // Keyboard-driven decks typically dispatch on keyCode, which CDP
            // only fills in when the virtual key code is set explicitly.
            if let Some(code) = windows_virtual_key_code(key) {
                builder = builder
                    .windows_virtual_key_code(code)
                    .native_virtual_key_code(code);
            }

            let params = builder
                .build()
                .map_err(|e| CaptureError::query(format!("invalid key event '{key}': {e}")))?;
            self.page
                .execute(params)
                .await
                .map_err(|e| CaptureError::query(format!("key dispatch '{key}' failed: {e}")))?;
        }
        Ok(())
    }

    async fn screenshot(&self) -> CaptureResult<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await
            .map_err(|e| CaptureError::capture(format!("screenshot failed: {e}")))
    }
}

fn windows_virtual_key_code(key: &str) -> Option<i64> {
    match key {
        "ArrowLeft" => Some(37),
        "ArrowRight" => Some(39),
        _ => None,
    }
}
