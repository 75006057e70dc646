use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Local};

use crate::error::CaptureResult;

const SCREENSHOT_DIR: &str = "screenshots";
const RECORDING_DIR: &str = "recordings";

/// One run's output location: a timestamp-named root holding a screenshot
/// collection and a recording collection, both keyed by slide index.
///
/// Creation is idempotent (`create_dir_all` semantics) and never touches
/// sibling roots left by earlier runs. The start instant is passed in by the
/// caller so the type stays clock-free.
#[derive(Clone, Debug)]
pub struct CaptureSession {
    root: PathBuf,
    screenshots: PathBuf,
    recordings: PathBuf,
}

impl CaptureSession {
    pub fn create(output_root: &Path, started_at: DateTime<Local>) -> CaptureResult<Self> {
        let root = output_root.join(started_at.format("%Y-%m-%dT%H-%M-%S").to_string());
        let screenshots = root.join(SCREENSHOT_DIR);
        let recordings = root.join(RECORDING_DIR);

        for dir in [&screenshots, &recordings] {
            fs::create_dir_all(dir)
                .with_context(|| format!("create session directory '{}'", dir.display()))?;
        }

        Ok(Self {
            root,
            screenshots,
            recordings,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn screenshot_path(&self, slide: u64) -> PathBuf {
        self.screenshots.join(format!("{slide}.png"))
    }

    pub fn recording_path(&self, slide: u64) -> PathBuf {
        self.recordings.join(format!("{slide}.mp4"))
    }

    /// Persist one slide's still image.
    pub fn write_screenshot(&self, slide: u64, png: &[u8]) -> CaptureResult<PathBuf> {
        let path = self.screenshot_path(slide);
        fs::write(&path, png)
            .with_context(|| format!("write screenshot '{}'", path.display()))?;
        Ok(path)
    }
}
