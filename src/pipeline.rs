use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use crate::{
    detect::has_animated_media,
    error::CaptureResult,
    navigate::advance,
    page::DeckPage,
    record::Recorder,
    session::CaptureSession,
    timer::{CaptureTimer, HoldOutcome},
};

/// Traversal state. `Done` is the only terminal state; the deck's end is
/// observable solely as an advance attempt that leaves the position unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Visiting,
    Recording,
    Done,
}

/// What one completed run produced.
#[derive(Clone, Debug)]
pub struct CaptureStats {
    pub slides: u64,
    pub recordings: u64,
}

/// Drives one capture session: per visited slide, screenshot, media check,
/// optional timed recording, advance. One slide runs fully to completion
/// before the next is visited; the page is exclusively owned for the whole
/// run.
///
/// No operation is retried — a screenshot or recorder failure aborts the
/// traversal, leaving whatever artifacts were already written on disk.
pub struct CaptureOrchestrator {
    page: Arc<dyn DeckPage>,
    recorder: Box<dyn Recorder>,
    session: CaptureSession,
    timer: CaptureTimer,
    video_length: Duration,
}

impl CaptureOrchestrator {
    pub fn new(
        page: Arc<dyn DeckPage>,
        recorder: Box<dyn Recorder>,
        session: CaptureSession,
        video_length: Duration,
    ) -> Self {
        Self {
            page,
            recorder,
            session,
            timer: CaptureTimer::new(),
            video_length,
        }
    }

    /// Timer driving the per-slide recording hold.
    pub fn timer(&self) -> &CaptureTimer {
        &self.timer
    }

    pub async fn run(mut self) -> CaptureResult<CaptureStats> {
        let mut phase = Phase::Visiting;
        let mut slide: u64 = 0;
        let mut recordings: u64 = 0;

        loop {
            match phase {
                Phase::Visiting => {
                    info!(slide, "capturing slide");
                    let png = self.page.screenshot().await?;
                    self.session.write_screenshot(slide, &png)?;

                    phase = if has_animated_media(self.page.as_ref()).await? {
                        Phase::Recording
                    } else {
                        self.advance_or_done(&mut slide).await?
                    };
                }
                Phase::Recording => {
                    let dest = self.session.recording_path(slide);
                    info!(slide, dest = %dest.display(), "slide has animated media, recording");

                    self.recorder.start(&dest).await?;
                    if self.timer.hold(self.video_length).await == HoldOutcome::Cancelled {
                        debug!(slide, "recording hold cancelled early");
                    }
                    self.recorder.stop().await?;

                    recordings += 1;
                    phase = self.advance_or_done(&mut slide).await?;
                }
                Phase::Done => break,
            }
        }

        let stats = CaptureStats {
            slides: slide + 1,
            recordings,
        };
        info!(
            slides = stats.slides,
            recordings = stats.recordings,
            root = %self.session.root().display(),
            "capture session sealed"
        );
        Ok(stats)
    }

    async fn advance_or_done(&self, slide: &mut u64) -> CaptureResult<Phase> {
        if advance(self.page.as_ref()).await? {
            *slide += 1;
            Ok(Phase::Visiting)
        } else {
            Ok(Phase::Done)
        }
    }
}
