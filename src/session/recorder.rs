use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::particles::field::ParticleField;
use crate::render::backend::{FrameRGBA, FrameRenderer, FrameScene};
use crate::session::plan::RecordingPlan;

/// Cooperative stop flag, checked between frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress reported while recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordingStatus {
    Initializing,
    Recording {
        /// Frames pushed so far.
        frame: u64,
        total: u64,
        elapsed: Duration,
    },
    Finalized {
        frames: u64,
        stop: StopReason,
    },
    Failed(String),
}

/// Why the frame loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every planned frame was written.
    Completed,
    /// The wall-clock limit ran out first.
    Watchdog,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordingOutcome {
    pub frames_written: u64,
    pub stop: StopReason,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct RecorderOpts {
    /// Finalize early once this much wall-clock time has passed.
    pub watchdog: Option<Duration>,
    pub cancel: CancelToken,
    /// Frames between two `Recording` status reports. `0` reports once per second of video.
    pub status_every: u64,
}

impl Default for RecorderOpts {
    fn default() -> Self {
        Self {
            watchdog: None,
            cancel: CancelToken::default(),
            status_every: 0,
        }
    }
}

type StatusFn<'a> = Box<dyn FnMut(&RecordingStatus) + 'a>;

/// Drives the render loop for one recording and streams frames into a [`FrameSink`].
pub struct Recorder<'a> {
    plan: RecordingPlan,
    canvas: Canvas,
    opts: RecorderOpts,
    on_status: Option<StatusFn<'a>>,
}

impl<'a> Recorder<'a> {
    pub fn new(plan: RecordingPlan, canvas: Canvas, opts: RecorderOpts) -> Self {
        Self {
            plan,
            canvas,
            opts,
            on_status: None,
        }
    }

    pub fn on_status(mut self, f: impl FnMut(&RecordingStatus) + 'a) -> Self {
        self.on_status = Some(Box::new(f));
        self
    }

    pub fn plan(&self) -> &RecordingPlan {
        &self.plan
    }

    fn emit(&mut self, status: RecordingStatus) {
        if let Some(f) = self.on_status.as_mut() {
            f(&status);
        }
    }

    /// Render and push frames until the plan is exhausted, the watchdog fires, or the token
    /// is cancelled. The sink is finalized in every case once `begin` succeeded.
    #[tracing::instrument(skip_all, fields(total = self.plan.total_frames, kind = %field.kind()))]
    pub fn run(
        &mut self,
        renderer: &mut dyn FrameRenderer,
        field: &mut ParticleField,
        quotes: &[String],
        audio: Option<AudioInputConfig>,
        sink: &mut dyn FrameSink,
    ) -> PostreelResult<RecordingOutcome> {
        self.emit(RecordingStatus::Initializing);

        let cfg = SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.plan.fps,
            audio,
            duration_secs: self.plan.duration_secs_f64(),
        };
        if let Err(e) = sink.begin(cfg) {
            self.emit(RecordingStatus::Failed(e.to_string()));
            return Err(e);
        }

        let start = Instant::now();
        let looped = self.drive(renderer, field, quotes, sink, start);
        let finished = sink.end();

        match (looped, finished) {
            (Ok((frames_written, stop)), Ok(())) => {
                let outcome = RecordingOutcome {
                    frames_written,
                    stop,
                    elapsed: start.elapsed(),
                };
                tracing::info!(
                    frames = frames_written,
                    ?stop,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "recording finalized"
                );
                self.emit(RecordingStatus::Finalized {
                    frames: frames_written,
                    stop,
                });
                Ok(outcome)
            }
            (Ok(_), Err(e)) => {
                self.emit(RecordingStatus::Failed(e.to_string()));
                Err(e)
            }
            (Err(e), finished) => {
                if let Err(end_err) = finished {
                    tracing::warn!(error = %end_err, "sink failed to finalize after an error");
                }
                self.emit(RecordingStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn drive(
        &mut self,
        renderer: &mut dyn FrameRenderer,
        field: &mut ParticleField,
        quotes: &[String],
        sink: &mut dyn FrameSink,
        start: Instant,
    ) -> PostreelResult<(u64, StopReason)> {
        let total = self.plan.total_frames;
        let every = match self.opts.status_every {
            0 => self.plan.fps.secs_to_frames_floor(1.0).max(1),
            n => n,
        };

        for f in 0..total {
            if self.opts.cancel.is_cancelled() {
                tracing::info!(frame = f, "recording cancelled");
                return Ok((f, StopReason::Cancelled));
            }
            if let Some(limit) = self.opts.watchdog
                && start.elapsed() >= limit
            {
                tracing::warn!(frame = f, limit_ms = limit.as_millis() as u64, "watchdog fired");
                return Ok((f, StopReason::Watchdog));
            }

            let idx = FrameIndex(f);
            let frame = render_at(renderer, field, &self.plan, quotes, idx)?;
            sink.push_frame(idx, &frame)?;

            let done = f + 1;
            if done % every == 0 || done == total {
                self.emit(RecordingStatus::Recording {
                    frame: done,
                    total,
                    elapsed: start.elapsed(),
                });
            }
        }
        Ok((total, StopReason::Completed))
    }
}

/// Advance `field` to `idx` and render that frame.
///
/// Particles move before they are drawn, so frame 0 already shows one step of motion.
pub fn render_at(
    renderer: &mut dyn FrameRenderer,
    field: &mut ParticleField,
    plan: &RecordingPlan,
    quotes: &[String],
    idx: FrameIndex,
) -> PostreelResult<FrameRGBA> {
    field.advance(idx);
    let quote = plan
        .quote_index(idx, quotes.len())
        .map(|i| quotes[i].as_str())
        .unwrap_or("");
    renderer.render_frame(
        idx,
        &FrameScene {
            kind: field.kind(),
            particles: field.particles(),
            quote,
        },
    )
}

/// Render frame `at` of a recording without encoding, replaying particle motion from frame 0.
pub fn render_still(
    renderer: &mut dyn FrameRenderer,
    field: &mut ParticleField,
    plan: &RecordingPlan,
    quotes: &[String],
    at: FrameIndex,
) -> PostreelResult<FrameRGBA> {
    if at.0 >= plan.total_frames {
        return Err(PostreelError::validation(format!(
            "frame {} is past the end of a {}-frame recording",
            at.0, plan.total_frames
        )));
    }
    for f in 0..at.0 {
        field.advance(FrameIndex(f));
    }
    render_at(renderer, field, plan, quotes, at)
}

#[cfg(test)]
#[path = "../../tests/unit/session/recorder.rs"]
mod tests;
