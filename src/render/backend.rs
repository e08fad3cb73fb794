use crate::foundation::core::FrameIndex;
use crate::foundation::error::PostreelResult;
use crate::particles::kind::AnimationKind;
use crate::particles::field::Particle;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is included to make this
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Un-premultiply into a straight-alpha buffer, e.g. for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// What changes from one frame to the next.
#[derive(Clone, Copy, Debug)]
pub struct FrameScene<'a> {
    pub kind: AnimationKind,
    pub particles: &'a [Particle],
    pub quote: &'a str,
}

/// Produces one composited frame per call.
///
/// The recorder only depends on this trait, so tests can substitute a cheap renderer.
pub trait FrameRenderer {
    fn render_frame(&mut self, idx: FrameIndex, scene: &FrameScene<'_>)
    -> PostreelResult<FrameRGBA>;
}
