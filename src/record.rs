use std::path::Path;

use crate::error::{CaptureError, CaptureResult};

/// External timed-capture collaborator: exactly one `start`/`stop` pair per
/// recorded slide. `start` begins capture into `dest`; `stop` finalizes the
/// file there.
#[async_trait::async_trait]
pub trait Recorder: Send {
    async fn start(&mut self, dest: &Path) -> CaptureResult<()>;
    async fn stop(&mut self) -> CaptureResult<()>;
}

/// Frame geometry and rate for recorded clips.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Display aspect ratio hint for the container, e.g. `"16:9"`.
    pub aspect_ratio: Option<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            width: 2560,
            height: 1440,
            aspect_ratio: Some("16:9".to_string()),
        }
    }
}

impl RecorderConfig {
    pub fn validate(&self) -> CaptureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::validation(
                "recorder width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(CaptureError::validation("recorder fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // We target yuv420p output for maximum player compatibility.
            return Err(CaptureError::validation(
                "recorder width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(
            RecorderConfig {
                width: 0,
                ..RecorderConfig::default()
            }
            .validate()
            .is_err()
        );

        assert!(
            RecorderConfig {
                width: 1281,
                ..RecorderConfig::default()
            }
            .validate()
            .is_err()
        );

        assert!(
            RecorderConfig {
                fps: 0,
                ..RecorderConfig::default()
            }
            .validate()
            .is_err()
        );

        assert!(RecorderConfig::default().validate().is_ok());
    }
}
