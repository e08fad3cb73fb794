use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PostreelError, PostreelResult};

/// Each quote stays on screen this long before the next one takes over.
pub const QUOTE_SECS: u32 = 5;

/// Frame budget and quote rotation for one recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordingPlan {
    pub fps: Fps,
    pub duration_secs: u32,
    pub total_frames: u64,
    pub frames_per_quote: u64,
}

impl RecordingPlan {
    pub fn new(fps: Fps, duration_secs: u32) -> PostreelResult<Self> {
        if duration_secs == 0 {
            return Err(PostreelError::validation("duration_secs must be > 0"));
        }
        let fps = Fps::new(fps.num, fps.den)?;
        let total_frames = fps.secs_to_frames_floor(f64::from(duration_secs));
        if total_frames == 0 {
            return Err(PostreelError::validation(
                "duration is shorter than a single frame",
            ));
        }
        let frames_per_quote = fps.secs_to_frames_floor(f64::from(QUOTE_SECS)).max(1);
        Ok(Self {
            fps,
            duration_secs,
            total_frames,
            frames_per_quote,
        })
    }

    /// Index into a list of `quote_count` quotes for `frame`, or `None` if there are none.
    pub fn quote_index(&self, frame: FrameIndex, quote_count: usize) -> Option<usize> {
        if quote_count == 0 {
            return None;
        }
        Some(((frame.0 / self.frames_per_quote) % quote_count as u64) as usize)
    }

    pub fn duration_secs_f64(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/plan.rs"]
mod tests;
