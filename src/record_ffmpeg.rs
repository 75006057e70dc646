use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use tokio::{
    io::AsyncWriteExt as _,
    process::{Child, Command},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::{CaptureError, CaptureResult},
    page::DeckPage,
    record::{Recorder, RecorderConfig},
};

pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> CaptureResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Timed clip capture backed by the system `ffmpeg` binary.
///
/// `start` spawns ffmpeg reading rawvideo RGBA on stdin plus a frame pump
/// task that screenshots the page at the configured rate; `stop` cancels the
/// pump, closes stdin and lets ffmpeg finalize the MP4.
///
/// We intentionally use the system `ffmpeg` binary rather than `ffmpeg-next`
/// to avoid native FFmpeg dev header/lib requirements.
pub struct FfmpegRecorder {
    cfg: RecorderConfig,
    page: Arc<dyn DeckPage>,
    active: Option<ActiveRecording>,
}

struct ActiveRecording {
    cancel: CancellationToken,
    pump: JoinHandle<CaptureResult<()>>,
    dest: PathBuf,
}

impl FfmpegRecorder {
    pub fn new(page: Arc<dyn DeckPage>, cfg: RecorderConfig) -> CaptureResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            page,
            active: None,
        })
    }
}

#[async_trait::async_trait]
impl Recorder for FfmpegRecorder {
    async fn start(&mut self, dest: &Path) -> CaptureResult<()> {
        if self.active.is_some() {
            return Err(CaptureError::recorder("recording already in progress"));
        }

        if !is_ffmpeg_on_path() {
            return Err(CaptureError::recorder(
                "ffmpeg is required for clip encoding, but was not found on PATH",
            ));
        }

        ensure_parent_dir(dest)?;

        let child = spawn_ffmpeg(&self.cfg, dest)?;
        let cancel = CancellationToken::new();
        let pump = tokio::spawn(pump_frames(
            Arc::clone(&self.page),
            self.cfg.clone(),
            child,
            cancel.clone(),
        ));

        debug!(dest = %dest.display(), fps = self.cfg.fps, "recording started");
        self.active = Some(ActiveRecording {
            cancel,
            pump,
            dest: dest.to_path_buf(),
        });
        Ok(())
    }

    async fn stop(&mut self) -> CaptureResult<()> {
        let Some(active) = self.active.take() else {
            return Err(CaptureError::recorder("no recording in progress"));
        };

        active.cancel.cancel();
        let result = active
            .pump
            .await
            .map_err(|e| CaptureError::recorder(format!("frame pump task failed: {e}")))?;

        debug!(dest = %active.dest.display(), "recording finalized");
        result
    }
}

fn spawn_ffmpeg(cfg: &RecorderConfig, dest: &Path) -> CaptureResult<Child> {
    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true);

    cmd.args([
        "-y",
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        &format!("{}x{}", cfg.width, cfg.height),
        "-r",
        &cfg.fps.to_string(),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ]);

    if let Some(aspect) = &cfg.aspect_ratio {
        cmd.args(["-aspect", aspect]);
    }

    cmd.arg(dest);

    cmd.spawn().map_err(|e| {
        CaptureError::recorder(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })
}

async fn pump_frames(
    page: Arc<dyn DeckPage>,
    cfg: RecorderConfig,
    mut child: Child,
    cancel: CancellationToken,
) -> CaptureResult<()> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| CaptureError::recorder("failed to open ffmpeg stdin (unexpected)"))?;

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(cfg.fps)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let started = tokio::time::Instant::now();
    let mut sent: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let png = page.screenshot().await?;
        let frame = decode_frame(&png, cfg.width, cfg.height)?;

        // Screenshot capture rarely sustains the nominal rate; repeat the
        // latest frame so the encoded duration tracks wall-clock time.
        let due = (started.elapsed().as_secs_f64() * f64::from(cfg.fps)).floor() as u64;
        let copies = due.saturating_sub(sent).max(1);
        for _ in 0..copies {
            stdin.write_all(&frame).await.map_err(|e| {
                CaptureError::recorder(format!("failed to write frame to ffmpeg stdin: {e}"))
            })?;
            sent += 1;
        }
    }

    stdin
        .shutdown()
        .await
        .map_err(|e| CaptureError::recorder(format!("failed to close ffmpeg stdin: {e}")))?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| CaptureError::recorder(format!("failed to wait for ffmpeg to finish: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CaptureError::recorder(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

/// PNG screenshot bytes to a rawvideo RGBA frame of the configured geometry.
///
/// Headed-browser viewports rarely match the target frame exactly, so a
/// mismatched still is resized rather than rejected.
fn decode_frame(png: &[u8], width: u32, height: u32) -> CaptureResult<Vec<u8>> {
    let decoded = image::load_from_memory(png)
        .map_err(|e| CaptureError::capture(format!("failed to decode screenshot frame: {e}")))?;

    let rgba = decoded.to_rgba8();
    let rgba = if rgba.width() != width || rgba.height() != height {
        image::imageops::resize(&rgba, width, height, image::imageops::FilterType::Triangle)
    } else {
        rgba
    };

    Ok(rgba.into_raw())
}
