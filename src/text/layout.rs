use std::sync::Arc;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::text::wrap::TextMeasure;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A single shaped line.
pub struct ShapedLine {
    pub layout: parley::Layout<TextBrushRgba8>,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Baseline offset of the first line from the top of the layout box.
    pub baseline: f32,
}

/// Stateful helper for shaping text with one registered font face.
///
/// Shaping runs full Unicode bidi, so Arabic or Hebrew quotes come out right-to-left without
/// any extra direction setting.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Arc<Vec<u8>>,
}

impl TextLayoutEngine {
    /// Register `font_bytes` (TTF/OTF) and build fresh Parley contexts.
    pub fn new(font_bytes: Vec<u8>) -> PostreelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PostreelError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PostreelError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: Arc::new(font_bytes),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font_bytes(&self) -> Arc<Vec<u8>> {
        self.font_bytes.clone()
    }

    /// Shape `text` on a single unbroken line.
    pub fn shape_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PostreelResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PostreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let mut advance = 0.0f32;
        let mut baseline = 0.0f32;
        for (i, line) in layout.lines().enumerate() {
            let m = line.metrics();
            advance = advance.max(m.advance);
            if i == 0 {
                baseline = m.baseline;
            }
        }

        Ok(ShapedLine {
            layout,
            advance,
            baseline,
        })
    }

    /// Borrow the engine as a [`TextMeasure`] at a fixed size.
    pub fn measure_at(&mut self, size_px: f32) -> ShapedMeasure<'_> {
        ShapedMeasure {
            engine: self,
            size_px,
        }
    }
}

/// [`TextMeasure`] backed by real shaping.
pub struct ShapedMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    size_px: f32,
}

impl TextMeasure for ShapedMeasure<'_> {
    fn measure(&mut self, text: &str) -> PostreelResult<f32> {
        Ok(self
            .engine
            .shape_line(text, self.size_px, TextBrushRgba8::default())?
            .advance)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
