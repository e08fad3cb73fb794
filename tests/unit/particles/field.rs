use super::*;

fn particle_at(x: f64, y: f64) -> Particle {
    Particle {
        id: 0,
        pos: Point::new(x, y),
        vel: Vec2::ZERO,
        size: 5.0,
        opacity: 1.0,
        color: Rgba8::WHITE,
    }
}

#[test]
fn none_kind_has_no_particles() {
    let field = ParticleField::new(AnimationKind::None, Canvas::REFERENCE, 1);
    assert!(field.particles().is_empty());

    let field = ParticleField::new(AnimationKind::Snow, Canvas::REFERENCE, 1);
    assert_eq!(field.particles().len(), PARTICLE_COUNT);
}

#[test]
fn bubbles_recycle_only_above_top() {
    let c = Canvas::REFERENCE;
    assert!(particle_at(100.0, -51.0).needs_recycle(AnimationKind::Bubbles, c));
    assert!(!particle_at(100.0, -49.0).needs_recycle(AnimationKind::Bubbles, c));
    // Freshly spawned bubbles sit below the bottom edge and must survive.
    assert!(!particle_at(100.0, 1300.0).needs_recycle(AnimationKind::Bubbles, c));
    assert!(!particle_at(-200.0, 600.0).needs_recycle(AnimationKind::Bubbles, c));
}

#[test]
fn clouds_recycle_only_past_right_edge() {
    let c = Canvas::REFERENCE;
    assert!(particle_at(771.0, 100.0).needs_recycle(AnimationKind::Clouds, c));
    assert!(!particle_at(700.0, 100.0).needs_recycle(AnimationKind::Clouds, c));
    // Clouds enter from x = -100.
    assert!(!particle_at(-100.0, 100.0).needs_recycle(AnimationKind::Clouds, c));
}

#[test]
fn circles_recycle_when_faded_or_oversized() {
    let c = Canvas::REFERENCE;
    let mut p = particle_at(360.0, 640.0);
    p.opacity = 0.0;
    assert!(p.needs_recycle(AnimationKind::Circles, c));

    let mut p = particle_at(360.0, 640.0);
    p.size = 201.0;
    assert!(p.needs_recycle(AnimationKind::Circles, c));

    let mut p = particle_at(360.0, 640.0);
    p.size = 150.0;
    p.opacity = 0.05;
    assert!(!p.needs_recycle(AnimationKind::Circles, c));
}

#[test]
fn stationary_kinds_never_recycle() {
    let c = Canvas::REFERENCE;
    for kind in [
        AnimationKind::Stars,
        AnimationKind::Light,
        AnimationKind::Sparkles,
    ] {
        assert!(!particle_at(-1000.0, 5000.0).needs_recycle(kind, c));
    }
}

#[test]
fn falling_kinds_recycle_outside_extended_frame() {
    let c = Canvas::REFERENCE;
    for kind in [
        AnimationKind::Snow,
        AnimationKind::Rain,
        AnimationKind::Confetti,
        AnimationKind::Hearts,
        AnimationKind::Fire,
    ] {
        assert!(particle_at(100.0, 1301.0).needs_recycle(kind, c), "{kind}");
        assert!(particle_at(100.0, -51.0).needs_recycle(kind, c), "{kind}");
        assert!(particle_at(771.0, 100.0).needs_recycle(kind, c), "{kind}");
        assert!(particle_at(-51.0, 100.0).needs_recycle(kind, c), "{kind}");
        assert!(!particle_at(100.0, -20.0).needs_recycle(kind, c), "{kind}");
        assert!(!particle_at(100.0, 1300.0).needs_recycle(kind, c), "{kind}");
    }
}

#[test]
fn spawn_ranges_match_kind_rules() {
    let c = Canvas::REFERENCE;
    let mut rng = Rng64::new(42);
    for i in 0..200 {
        let p = Particle::spawn(AnimationKind::Rain, i, FrameIndex(0), &mut rng, c);
        assert_eq!(p.pos.y, -20.0);
        assert!((0.0..720.0).contains(&p.pos.x));
        assert!((2.0..5.0).contains(&p.size));
        assert!((5.0..10.0).contains(&p.vel.y));
        assert_eq!(p.opacity, 0.7);

        let p = Particle::spawn(AnimationKind::Bubbles, i, FrameIndex(0), &mut rng, c);
        assert_eq!(p.pos.y, 1300.0);
        assert!(p.vel.y < -1.0 + 1e-12 && p.vel.y >= -3.0);

        let p = Particle::spawn(AnimationKind::Circles, i, FrameIndex(0), &mut rng, c);
        assert_eq!(p.pos, Point::new(360.0, 640.0));
        assert!((50.0..150.0).contains(&p.size));
    }
}

#[test]
fn palette_is_cycled_by_index() {
    let mut rng = Rng64::new(3);
    let c = Canvas::REFERENCE;
    let colors: Vec<Rgba8> = (0..6)
        .map(|i| Particle::spawn(AnimationKind::Confetti, i, FrameIndex(0), &mut rng, c).color)
        .collect();
    assert_eq!(colors[0], colors[5]);
    assert_eq!(colors[0], Rgba8::rgb(0xFF, 0, 0));
    assert_eq!(colors[2], Rgba8::rgb(0, 0, 0xFF));
}

#[test]
fn stars_twinkle_within_bounds() {
    let mut p = particle_at(10.0, 10.0);
    p.id = 3;
    for f in 0..500 {
        p.step(AnimationKind::Stars, FrameIndex(f));
        assert!((0.2..=1.0 + 1e-12).contains(&p.opacity));
    }
    assert_eq!(p.pos, Point::new(10.0, 10.0));
}

#[test]
fn circles_grow_and_fade_each_frame() {
    let mut p = particle_at(360.0, 640.0);
    p.size = 50.0;
    p.opacity = 0.1;
    p.step(AnimationKind::Circles, FrameIndex(0));
    assert_eq!(p.size, 50.5);
    assert!((p.opacity - 0.099).abs() < 1e-12);
}

#[test]
fn field_advance_keeps_population_and_ids() {
    let mut field = ParticleField::new(AnimationKind::Rain, Canvas::REFERENCE, 9);
    let mut recycled = 0;
    for f in 0..600 {
        recycled += field.advance(FrameIndex(f));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }
    // Rain crosses the frame in at most ~265 frames, so everything recycles at least once.
    assert!(recycled >= PARTICLE_COUNT);
    for (i, p) in field.particles().iter().enumerate() {
        assert_eq!(p.id as usize, i);
        assert!(!p.needs_recycle(AnimationKind::Rain, Canvas::REFERENCE));
    }
}

#[test]
fn field_is_deterministic_for_a_seed() {
    let mut a = ParticleField::new(AnimationKind::Confetti, Canvas::REFERENCE, 5);
    let mut b = ParticleField::new(AnimationKind::Confetti, Canvas::REFERENCE, 5);
    for f in 0..100 {
        a.advance(FrameIndex(f));
        b.advance(FrameIndex(f));
    }
    assert_eq!(a.particles(), b.particles());
}
