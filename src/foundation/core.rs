use crate::foundation::error::{PostreelError, PostreelResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> PostreelResult<Self> {
        if den == 0 {
            return Err(PostreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PostreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn whole(fps: u32) -> PostreelResult<Self> {
        Self::new(fps, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output raster size in pixels.
///
/// Particle spawn positions and text metrics are expressed against the 720x1280 portrait
/// reference canvas and scaled to the actual size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const REFERENCE: Canvas = Canvas {
        width: 720,
        height: 1280,
    };

    pub fn validate(self) -> PostreelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PostreelError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(PostreelError::validation("canvas width/height exceeds u16"));
        }
        Ok(())
    }

    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Horizontal factor relative to [`Canvas::REFERENCE`].
    pub fn sx(self) -> f64 {
        self.w() / Self::REFERENCE.w()
    }

    /// Vertical factor relative to [`Canvas::REFERENCE`].
    pub fn sy(self) -> f64 {
        self.h() / Self::REFERENCE.h()
    }

    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
