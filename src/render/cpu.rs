use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::config::post::{BackgroundFit, PostConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{PostreelError, PostreelResult};
use crate::particles::field::Particle;
use crate::particles::kind::Glow;
use crate::render::backend::{FrameRGBA, FrameRenderer, FrameScene};
use crate::render::blur::blur_rows_in_place;
use crate::render::composite::over_in_place;
use crate::render::quote::{QuoteMetrics, SHADOW_BLUR_PX};
use crate::text::layout::{ShapedLine, TextBrushRgba8, TextLayoutEngine};
use crate::text::wrap::wrap_greedy;

/// Black veil drawn over the background so the quote stays readable.
pub const OVERLAY: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 102,
};

/// Everything the renderer needs besides the media itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CpuRenderSettings {
    pub canvas: Canvas,
    pub fit: BackgroundFit,
    pub text_color: Rgba8,
    pub font_size: u32,
}

impl CpuRenderSettings {
    pub fn from_config(cfg: &PostConfig) -> Self {
        Self {
            canvas: cfg.canvas,
            fit: cfg.style.fit,
            text_color: cfg.style.color,
            font_size: cfg.style.font_size,
        }
    }
}

struct Background {
    paint: vello_cpu::Image,
    width: f64,
    height: f64,
}

struct TextLayer {
    quote: String,
    /// Full-canvas premultiplied pixels, `None` when the quote is blank.
    pixels: Option<Vec<u8>>,
}

/// Software renderer built on `vello_cpu`.
///
/// The background paint and the shaped quote are cached; only the particle layer is
/// rasterized from scratch each frame.
pub struct CpuRenderer {
    settings: CpuRenderSettings,
    width: u16,
    height: u16,
    metrics: QuoteMetrics,
    background: Option<Background>,
    text: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    text_layer: Option<TextLayer>,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    pub fn new(
        settings: CpuRenderSettings,
        background: Option<&PreparedImage>,
        font_bytes: Vec<u8>,
    ) -> PostreelResult<Self> {
        settings.canvas.validate()?;
        let width: u16 = settings
            .canvas
            .width
            .try_into()
            .map_err(|_| PostreelError::render("canvas width exceeds u16"))?;
        let height: u16 = settings
            .canvas
            .height
            .try_into()
            .map_err(|_| PostreelError::render("canvas height exceeds u16"))?;
        let metrics = QuoteMetrics::new(settings.font_size, settings.canvas)?;

        let background = background.map(background_paint).transpose()?;
        let text = TextLayoutEngine::new(font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(text.font_bytes().as_ref().clone()),
            0,
        );

        Ok(Self {
            settings,
            width,
            height,
            metrics,
            background,
            text,
            font,
            text_layer: None,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn settings(&self) -> &CpuRenderSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &QuoteMetrics {
        &self.metrics
    }

    /// Wrapped lines for `quote` with the current font and canvas.
    pub fn wrap_quote(&mut self, quote: &str) -> PostreelResult<Vec<String>> {
        let mut measure = self.text.measure_at(self.metrics.font_px);
        wrap_greedy(quote, self.metrics.max_width, &mut measure)
    }

    fn text_layer_for(&mut self, quote: &str) -> PostreelResult<Option<&[u8]>> {
        let stale = self
            .text_layer
            .as_ref()
            .is_none_or(|layer| layer.quote != quote);
        if stale {
            tracing::debug!(chars = quote.chars().count(), "shaping quote");
            let pixels = self.build_text_layer(quote)?;
            self.text_layer = Some(TextLayer {
                quote: quote.to_owned(),
                pixels,
            });
        }
        Ok(self
            .text_layer
            .as_ref()
            .and_then(|layer| layer.pixels.as_deref()))
    }

    fn build_text_layer(&mut self, quote: &str) -> PostreelResult<Option<Vec<u8>>> {
        if quote.trim().is_empty() {
            return Ok(None);
        }

        let lines = self.wrap_quote(quote)?;
        let brush = TextBrushRgba8::from(self.settings.text_color);
        let mut placed: Vec<(ShapedLine, f64, f64)> = Vec::with_capacity(lines.len());
        for (line, baseline) in lines.iter().zip(self.metrics.baselines(lines.len())) {
            if line.is_empty() {
                continue;
            }
            let shaped = self.text.shape_line(line, self.metrics.font_px, brush)?;
            let x = self.metrics.center_x - shaped.advance / 2.0;
            let y = baseline - shaped.baseline;
            placed.push((shaped, f64::from(x), f64::from(y)));
        }
        if placed.is_empty() {
            return Ok(None);
        }

        let mut shadow = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        draw_lines(&mut ctx, &self.font, &placed, Some(Rgba8::BLACK));
        ctx.flush();
        ctx.render_to_pixmap(&mut shadow);

        let first = self.metrics.first_baseline(lines.len());
        let top = (first - self.metrics.font_px * 1.2).floor().max(0.0) as u32;
        let bottom = (first + lines.len() as f32 * self.metrics.line_height)
            .ceil()
            .max(0.0) as u32;
        blur_rows_in_place(
            shadow.data_as_u8_slice_mut(),
            u32::from(self.width),
            u32::from(self.height),
            top.min(u32::from(self.height))..bottom.min(u32::from(self.height)),
            SHADOW_BLUR_PX,
            self.metrics.shadow_sigma(),
        )?;

        let mut fill = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        draw_lines(&mut ctx, &self.font, &placed, None);
        ctx.flush();
        ctx.render_to_pixmap(&mut fill);

        let mut pixels = shadow.data_as_u8_slice().to_vec();
        over_in_place(&mut pixels, fill.data_as_u8_slice(), 1.0)?;
        Ok(Some(pixels))
    }
}

impl FrameRenderer for CpuRenderer {
    #[tracing::instrument(level = "trace", skip_all, fields(frame = idx.0))]
    fn render_frame(
        &mut self,
        idx: FrameIndex,
        scene: &FrameScene<'_>,
    ) -> PostreelResult<FrameRGBA> {
        let canvas = self.settings.canvas;
        let full = vello_cpu::kurbo::Rect::new(0.0, 0.0, canvas.w(), canvas.h());

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(Rgba8::BLACK));
        ctx.fill_rect(&full);

        if let Some(bg) = &self.background {
            ctx.set_transform(background_transform(
                self.settings.fit,
                canvas,
                bg.width,
                bg.height,
            ));
            ctx.set_paint(bg.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, bg.width, bg.height));
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        }

        ctx.set_paint(color_to_cpu(OVERLAY));
        ctx.fill_rect(&full);

        let glow = scene.kind.glow();
        for p in scene.particles {
            draw_particle(&mut ctx, p, glow);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        if let Some(layer) = self.text_layer_for(scene.quote)? {
            over_in_place(&mut data, layer, 1.0)?;
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn background_paint(img: &PreparedImage) -> PostreelResult<Background> {
    let pixmap = image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    Ok(Background {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        width: f64::from(img.width),
        height: f64::from(img.height),
    })
}

/// Maps the image rect `(0, 0, img_w, img_h)` onto the canvas.
pub(crate) fn background_transform(
    fit: BackgroundFit,
    canvas: Canvas,
    img_w: f64,
    img_h: f64,
) -> vello_cpu::kurbo::Affine {
    let (sx, sy) = (canvas.w() / img_w, canvas.h() / img_h);
    match fit {
        BackgroundFit::Stretch => vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
        BackgroundFit::Cover => {
            let s = sx.max(sy);
            let dx = (canvas.w() - img_w * s) / 2.0;
            let dy = (canvas.h() - img_h * s) / 2.0;
            vello_cpu::kurbo::Affine::translate((dx, dy)) * vello_cpu::kurbo::Affine::scale(s)
        }
    }
}

/// Halo rings standing in for a canvas `shadowBlur`: `(radius factor, radius add, alpha factor)`.
const TINTED_HALO: [(f64, f64, f64); 3] = [(3.0, 0.0, 0.08), (2.2, 0.0, 0.14), (1.5, 0.0, 0.25)];
const SOFT_HALO: [(f64, f64, f64); 2] = [(1.0, 6.0, 0.08), (1.0, 3.0, 0.15)];

fn draw_particle(ctx: &mut vello_cpu::RenderContext, p: &Particle, glow: Glow) {
    if !p.size.is_finite() || p.size <= 0.0 || p.opacity <= 0.0 {
        return;
    }
    let opacity = p.opacity.min(1.0);
    let (halo, tint) = match glow {
        Glow::Tinted => (&TINTED_HALO[..], p.color),
        Glow::Soft => (&SOFT_HALO[..], Rgba8::WHITE),
    };
    for &(mul, add, alpha) in halo {
        ctx.set_paint(color_to_cpu(tint.with_opacity(opacity * alpha)));
        ctx.fill_path(&circle_path(p.pos, p.size * mul + add));
    }
    ctx.set_paint(color_to_cpu(p.color.with_opacity(opacity)));
    ctx.fill_path(&circle_path(p.pos, p.size));
}

fn circle_path(center: kurbo::Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::Shape as _;
    bezpath_to_cpu(&kurbo::Circle::new(center, radius).to_path(0.1))
}

/// Draws each line's glyph runs at its offset; `paint` overrides the run brush.
fn draw_lines(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    lines: &[(ShapedLine, f64, f64)],
    paint: Option<Rgba8>,
) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for (shaped, x, y) in lines {
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((*x, *y)));
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let color = paint.unwrap_or_else(|| {
                    let b = run.style().brush;
                    Rgba8 {
                        r: b.r,
                        g: b.g,
                        b: b.b,
                        a: b.a,
                    }
                });
                ctx.set_paint(color_to_cpu(color));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PostreelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PostreelError::render("background width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PostreelError::render("background height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PostreelError::render("background byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
