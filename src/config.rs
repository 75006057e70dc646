use std::{path::PathBuf, time::Duration};

use crate::{
    error::{CaptureError, CaptureResult},
    record::RecorderConfig,
};

/// One capture run's knobs. Defaults mirror a local deck server on port 9000
/// with 15-second clips of animated slides.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Presentation URL; assumed reachable before the run starts.
    pub url: String,
    /// Root under which each run creates its own timestamped session dir.
    pub output_root: PathBuf,
    /// Fixed recording ceiling per animated slide. Media loop length is not
    /// observable from the markup, so one coarse ceiling applies uniformly.
    pub video_length_secs: u64,
    pub headless: bool,
    pub recorder: RecorderConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000".to_string(),
            output_root: PathBuf::from("output"),
            video_length_secs: 15,
            headless: false,
            recorder: RecorderConfig::default(),
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> CaptureResult<()> {
        if self.url.is_empty() {
            return Err(CaptureError::validation("url must not be empty"));
        }
        if self.video_length_secs == 0 {
            return Err(CaptureError::validation(
                "video_length_secs must be non-zero",
            ));
        }
        self.recorder.validate()
    }

    pub fn video_length(&self) -> Duration {
        Duration::from_secs(self.video_length_secs)
    }
}
