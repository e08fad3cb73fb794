use super::*;
use crate::foundation::core::Point;
use crate::particles::kind::AnimationKind;

const TEST_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/fonts/DejaVuSans-Bold.ttf"
);

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(rgba.repeat((w * h) as usize)),
    }
}

fn small_settings() -> CpuRenderSettings {
    CpuRenderSettings {
        canvas: Canvas {
            width: 180,
            height: 320,
        },
        fit: BackgroundFit::Stretch,
        text_color: Rgba8::WHITE,
        font_size: 40,
    }
}

fn renderer(bg: Option<&PreparedImage>) -> CpuRenderer {
    CpuRenderer::new(small_settings(), bg, std::fs::read(TEST_FONT).unwrap()).unwrap()
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

#[test]
fn stretch_maps_image_corners_to_canvas_corners() {
    let t = background_transform(BackgroundFit::Stretch, Canvas::REFERENCE, 100.0, 50.0);
    let p = t * vello_cpu::kurbo::Point::new(100.0, 50.0);
    assert!((p.x - 720.0).abs() < 1e-9);
    assert!((p.y - 1280.0).abs() < 1e-9);
}

#[test]
fn cover_keeps_aspect_and_centers() {
    let t = background_transform(BackgroundFit::Cover, Canvas::REFERENCE, 100.0, 100.0);
    let origin = t * vello_cpu::kurbo::Point::new(0.0, 0.0);
    let corner = t * vello_cpu::kurbo::Point::new(100.0, 100.0);
    assert!((origin.x + 280.0).abs() < 1e-9);
    assert!(origin.y.abs() < 1e-9);
    assert!((corner.x - 1000.0).abs() < 1e-9);
    assert!((corner.y - 1280.0).abs() < 1e-9);
}

#[test]
fn rejects_unusable_font() {
    assert!(CpuRenderer::new(small_settings(), None, vec![1, 2, 3]).is_err());
}

#[test]
fn background_is_dimmed_by_overlay() {
    let bg = solid_image(2, 2, [255, 0, 0, 255]);
    let mut r = renderer(Some(&bg));
    let scene = FrameScene {
        kind: AnimationKind::None,
        particles: &[],
        quote: "",
    };
    let frame = r.render_frame(FrameIndex(0), &scene).unwrap();
    assert_eq!((frame.width, frame.height), (180, 320));
    assert!(frame.premultiplied);
    assert!(close(pixel(&frame, 90, 20), [153, 0, 0, 255]));
}

#[test]
fn missing_background_renders_black_under_overlay() {
    let mut r = renderer(None);
    let scene = FrameScene {
        kind: AnimationKind::None,
        particles: &[],
        quote: "   ",
    };
    let frame = r.render_frame(FrameIndex(0), &scene).unwrap();
    assert!(close(pixel(&frame, 5, 5), [0, 0, 0, 255]));
}

#[test]
fn particles_light_up_their_position() {
    let mut r = renderer(None);
    let p = Particle {
        id: 0,
        pos: Point::new(40.0, 40.0),
        vel: crate::foundation::core::Vec2::ZERO,
        size: 6.0,
        opacity: 1.0,
        color: Rgba8::rgb(255, 255, 0),
    };
    let scene = FrameScene {
        kind: AnimationKind::Stars,
        particles: std::slice::from_ref(&p),
        quote: "",
    };
    let frame = r.render_frame(FrameIndex(0), &scene).unwrap();
    assert!(close(pixel(&frame, 40, 40), [255, 255, 0, 255]));
    assert!(close(pixel(&frame, 150, 300), [0, 0, 0, 255]));
}

#[test]
fn quote_is_drawn_near_the_center() {
    let mut r = renderer(None);
    let blank = FrameScene {
        kind: AnimationKind::None,
        particles: &[],
        quote: "",
    };
    let quoted = FrameScene {
        quote: "Hi",
        ..blank
    };
    let a = r.render_frame(FrameIndex(0), &blank).unwrap();
    let b = r.render_frame(FrameIndex(1), &quoted).unwrap();

    let changed: Vec<(u32, u32)> = (0..b.height)
        .flat_map(|y| (0..b.width).map(move |x| (x, y)))
        .filter(|&(x, y)| pixel(&a, x, y) != pixel(&b, x, y))
        .collect();
    assert!(!changed.is_empty());
    let bright = (0..b.height)
        .flat_map(|y| (0..b.width).map(move |x| (x, y)))
        .any(|(x, y)| pixel(&b, x, y)[0] > 200);
    assert!(bright);
    for &(_, y) in &changed {
        assert!(y > 80 && y < 240, "row {y} is far from the center");
    }
}

#[test]
fn long_quotes_wrap_to_several_lines() {
    let mut r = renderer(None);
    let lines = r
        .wrap_quote("the quick brown fox jumps over the lazy dog again and again")
        .unwrap();
    assert!(lines.len() > 2);
    assert!(lines.iter().all(|l| !l.ends_with(' ')));
}
