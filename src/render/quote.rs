use crate::foundation::core::Canvas;
use crate::foundation::error::{PostreelError, PostreelResult};

/// Width of the preview the font size presets are expressed in.
pub const PREVIEW_WIDTH_PX: f64 = 450.0;
/// Maximum quote line width on the reference canvas.
pub const REFERENCE_MAX_LINE_WIDTH_PX: f64 = 600.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.4;
/// Blur radius of the text shadow, in pixels.
pub const SHADOW_BLUR_PX: u32 = 20;

/// Placement of the quote block on a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteMetrics {
    pub font_px: f32,
    pub line_height: f32,
    pub max_width: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl QuoteMetrics {
    pub fn new(font_size: u32, canvas: Canvas) -> PostreelResult<Self> {
        canvas.validate()?;
        let font_px = (f64::from(font_size) * canvas.w() / PREVIEW_WIDTH_PX).floor() as f32;
        if font_px < 1.0 {
            return Err(PostreelError::validation(format!(
                "font_size {font_size} is too small for a {}px wide canvas",
                canvas.width
            )));
        }
        Ok(Self {
            font_px,
            line_height: font_px * LINE_HEIGHT_FACTOR,
            max_width: (REFERENCE_MAX_LINE_WIDTH_PX * canvas.sx()) as f32,
            center_x: (canvas.w() / 2.0) as f32,
            center_y: (canvas.h() / 2.0) as f32,
        })
    }

    /// Baseline of the first of `lines` lines, keeping the block centered vertically.
    pub fn first_baseline(&self, lines: usize) -> f32 {
        self.center_y - lines as f32 * self.line_height / 2.0
    }

    /// Baseline y of every line, top to bottom.
    pub fn baselines(&self, lines: usize) -> impl Iterator<Item = f32> + '_ {
        let first = self.first_baseline(lines);
        (0..lines).map(move |i| first + i as f32 * self.line_height)
    }

    /// Blur sigma matching a canvas `shadowBlur` of [`SHADOW_BLUR_PX`].
    pub fn shadow_sigma(&self) -> f32 {
        SHADOW_BLUR_PX as f32 / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/quote.rs"]
mod tests;
