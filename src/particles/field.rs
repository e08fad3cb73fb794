use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, FrameIndex, Point, Vec2};
use crate::foundation::math::Rng64;
use crate::particles::kind::{AnimationKind, RecyclePolicy};

/// Population used while recording.
pub const PARTICLE_COUNT: usize = 50;

/// Margin past the frame edges before a particle counts as gone.
const EDGE_MARGIN: f64 = 50.0;
/// Falling kinds enter this far above the top edge; rising kinds this far below the bottom.
const ENTRY_OFFSET: f64 = 20.0;
const CIRCLE_MAX_SIZE: f64 = 200.0;

/// A single animated dot.
///
/// `size` is the circle radius in pixels. Velocities are in pixels per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub pos: Point,
    pub vel: Vec2,
    pub size: f64,
    pub opacity: f64,
    pub color: Rgba8,
}

impl Particle {
    /// Generate particle `index` for `kind` as it would enter at `frame`.
    pub fn spawn(
        kind: AnimationKind,
        index: u32,
        frame: FrameIndex,
        rng: &mut Rng64,
        canvas: Canvas,
    ) -> Self {
        let (w, h) = (canvas.w(), canvas.h());
        let f = frame.0 as f64;
        let palette = kind.palette();
        let color = palette[index as usize % palette.len()];
        let mut r = || rng.next_f64_01();

        // (x, y, size, vx, vy, opacity)
        let (x, y, size, vx, vy, opacity) = match kind {
            AnimationKind::None => (0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            AnimationKind::Snow => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 8.0 + 4.0,
                (f * 0.01).sin() * 0.5,
                r() * 2.0 + 1.0,
                r() * 0.6 + 0.4,
            ),
            AnimationKind::Stars => (
                r() * w,
                r() * h,
                r() * 3.0 + 1.0,
                0.0,
                0.0,
                r() * 0.5 + 0.5,
            ),
            AnimationKind::Rain => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 3.0 + 2.0,
                0.0,
                r() * 5.0 + 5.0,
                0.7,
            ),
            AnimationKind::Bubbles => (
                r() * w,
                h + ENTRY_OFFSET,
                r() * 20.0 + 10.0,
                r() * 2.0 - 1.0,
                -(r() * 2.0 + 1.0),
                0.5,
            ),
            AnimationKind::Confetti => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 8.0 + 4.0,
                r() * 4.0 - 2.0,
                r() * 3.0 + 2.0,
                1.0,
            ),
            AnimationKind::Leaves => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 12.0 + 8.0,
                (f * 0.01).sin() * 2.0,
                r() * 1.5 + 0.5,
                0.8,
            ),
            AnimationKind::Butterflies => (
                r() * w,
                r() * h,
                r() * 15.0 + 10.0,
                (f * 0.1).sin() * 3.0,
                r() + 0.5,
                0.9,
            ),
            AnimationKind::Hearts => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 15.0 + 10.0,
                r() * 2.0 - 1.0,
                r() * 2.0 + 1.0,
                0.8,
            ),
            AnimationKind::Particles => (
                r() * w,
                r() * h,
                r() * 4.0 + 2.0,
                r() * 0.5 - 0.25,
                r() * 0.5 - 0.25,
                r() * 0.5 + 0.5,
            ),
            AnimationKind::Light => (
                r() * w,
                r() * h,
                r() * 6.0 + 3.0,
                0.0,
                0.0,
                r() * 0.3 + 0.2,
            ),
            AnimationKind::Fire => (
                r() * w,
                h + ENTRY_OFFSET,
                r() * 20.0 + 10.0,
                r() * 2.0 - 1.0,
                -(r() * 3.0 + 2.0),
                r() * 0.7 + 0.3,
            ),
            AnimationKind::Smoke => (
                r() * w,
                h + ENTRY_OFFSET,
                r() * 30.0 + 20.0,
                r() - 0.5,
                -(r() + 0.5),
                r() * 0.3 + 0.1,
            ),
            AnimationKind::Clouds => (
                -100.0,
                r() * 400.0 * canvas.sy(),
                r() * 50.0 + 40.0,
                r() * 0.5 + 0.2,
                0.0,
                0.4,
            ),
            AnimationKind::Petals => (
                r() * w,
                -ENTRY_OFFSET,
                r() * 10.0 + 6.0,
                (f * 0.01).sin() * 1.5,
                r() * 1.5 + 0.8,
                0.7,
            ),
            AnimationKind::Sparkles => (
                r() * w,
                r() * h,
                r() * 5.0 + 2.0,
                0.0,
                0.0,
                r() * 0.5 + 0.5,
            ),
            AnimationKind::Aurora => (
                r() * w,
                r() * h,
                r() * 100.0 + 50.0,
                r() * 0.2 - 0.1,
                r() * 0.2,
                0.1,
            ),
            AnimationKind::Plasma => (
                r() * w,
                r() * h,
                r() * 80.0 + 40.0,
                r() * 0.5 - 0.25,
                r() * 0.5 - 0.25,
                0.2,
            ),
            AnimationKind::Waves => (
                r() * w,
                h - ((f * 0.1).sin() * 200.0 * canvas.sy()).abs(),
                r() * 40.0 + 30.0,
                0.0,
                (f * 0.001).sin() * 2.0,
                0.3,
            ),
            AnimationKind::Circles => (
                w * 0.5,
                h * 0.5,
                r() * 100.0 + 50.0,
                0.0,
                0.0,
                r() * 0.1 + 0.05,
            ),
        };

        Self {
            id: index,
            pos: Point::new(x, y),
            vel: Vec2::new(vx, vy),
            size,
            opacity,
            color,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, kind: AnimationKind, frame: FrameIndex) {
        self.pos += self.vel;

        if kind.twinkles() {
            let phase = frame.0 as f64 * 0.05 + f64::from(self.id);
            self.opacity = phase.sin().abs() * 0.8 + 0.2;
        } else if kind == AnimationKind::Circles {
            self.size += 0.5;
            self.opacity -= 0.001;
        }
    }

    pub fn needs_recycle(&self, kind: AnimationKind, canvas: Canvas) -> bool {
        let Point { x, y } = self.pos;
        match kind.recycle_policy() {
            RecyclePolicy::Never => false,
            RecyclePolicy::AboveTop => y < -EDGE_MARGIN,
            RecyclePolicy::PastRight => x > canvas.w() + EDGE_MARGIN,
            RecyclePolicy::Faded => self.opacity <= 0.0 || self.size > CIRCLE_MAX_SIZE,
            RecyclePolicy::OutsideFrame => {
                y > canvas.h() + ENTRY_OFFSET
                    || y < -EDGE_MARGIN
                    || x > canvas.w() + EDGE_MARGIN
                    || x < -EDGE_MARGIN
            }
        }
    }
}

/// Fixed-size particle population for one animation kind.
#[derive(Clone, Debug)]
pub struct ParticleField {
    kind: AnimationKind,
    canvas: Canvas,
    rng: Rng64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(kind: AnimationKind, canvas: Canvas, seed: u64) -> Self {
        let count = if kind == AnimationKind::None {
            0
        } else {
            PARTICLE_COUNT
        };
        Self::with_count(kind, canvas, seed, count)
    }

    pub fn with_count(kind: AnimationKind, canvas: Canvas, seed: u64, count: usize) -> Self {
        let mut rng = Rng64::new(seed);
        let particles = (0..count as u32)
            .map(|i| Particle::spawn(kind, i, FrameIndex(0), &mut rng, canvas))
            .collect();
        Self {
            kind,
            canvas,
            rng,
            particles,
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Step every particle, then regenerate the ones that left their bounds.
    ///
    /// Returns the number of recycled particles.
    pub fn advance(&mut self, frame: FrameIndex) -> usize {
        let mut recycled = 0usize;
        for p in &mut self.particles {
            p.step(self.kind, frame);
            if p.needs_recycle(self.kind, self.canvas) {
                *p = Particle::spawn(self.kind, p.id, frame, &mut self.rng, self.canvas);
                recycled += 1;
            }
        }
        recycled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
