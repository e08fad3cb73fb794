use super::*;
use crate::assets::source::MediaSource;
use crate::catalog::model::QuoteCategory;
use crate::config::post::{BackgroundFit, PostStyle};
use crate::foundation::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::particles::kind::AnimationKind;

const TEST_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/fonts/DejaVuSans-Bold.ttf"
);

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("postreel_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(image: Option<PathBuf>, quotes: &[&str]) -> PostConfig {
    PostConfig {
        image: image.map(MediaSource::Path),
        sound: None,
        quotes: quotes.iter().map(|q| q.to_string()).collect(),
        category: None,
        style: PostStyle {
            font: PathBuf::from(TEST_FONT),
            color: Rgba8::WHITE,
            font_size: 40,
            animation: AnimationKind::Snow,
            duration_secs: 20,
            fit: BackgroundFit::Stretch,
        },
        canvas: Canvas {
            width: 180,
            height: 320,
        },
        fps: 30,
        seed: 1,
    }
}

#[test]
fn blank_quotes_without_category_fail_validation() {
    let cfg = config(Some(PathBuf::from("bg.png")), &["", "  "]);
    let err = prepare_post(&cfg, None, Path::new("."), false)
        .err()
        .unwrap();
    assert!(matches!(err, PostreelError::Validation(_)), "{err}");
}

#[test]
fn category_quotes_need_a_client() {
    let mut cfg = config(Some(PathBuf::from("bg.png")), &[]);
    cfg.category = Some(QuoteCategory::Love);
    let err = prepare_post(&cfg, None, Path::new("."), false)
        .err()
        .unwrap();
    assert!(matches!(err, PostreelError::Fetch(_)), "{err}");
}

#[test]
fn recordings_require_a_sound() {
    let cfg = config(Some(PathBuf::from("bg.png")), &["hello"]);
    let err = prepare_post(&cfg, None, Path::new("."), true)
        .err()
        .unwrap();
    assert!(err.to_string().contains("sound"), "{err}");
}

#[test]
fn missing_background_file_is_reported() {
    let cfg = config(Some(PathBuf::from("/definitely/not/here.png")), &["hello"]);
    assert!(prepare_post(&cfg, None, Path::new("."), false).is_err());
}

#[test]
fn output_path_is_explicit_or_generated() {
    let generated = RecordOpts {
        out_dir: PathBuf::from("out"),
        container: Container::Mp4,
        ..RecordOpts::default()
    };
    assert_eq!(
        generated.output_path(30, 1234),
        PathBuf::from("out").join("post-1234-30s.mp4")
    );

    let explicit = RecordOpts {
        out_path: Some(PathBuf::from("mine.webm")),
        ..generated
    };
    assert_eq!(explicit.output_path(30, 1234), PathBuf::from("mine.webm"));
}

#[test]
fn prepares_and_renders_a_still() {
    let dir = temp_dir("prepare_still");
    let png = dir.join("bg.png");
    image::save_buffer_with_format(
        &png,
        &[30u8, 60, 90, 255].repeat(16),
        4,
        4,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();

    let cfg = config(Some(png), &["", "first", "second"]);
    let post = prepare_post(&cfg, None, &dir, false).unwrap();
    assert_eq!(post.quotes, vec!["first".to_owned(), "second".to_owned()]);
    assert_eq!((post.background.width, post.background.height), (4, 4));
    assert!(post.sound.is_none());
    assert_eq!(post.plan().unwrap().total_frames, 600);

    let frame = post.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((frame.width, frame.height), (180, 320));
    assert_eq!(frame.data.len(), 180 * 320 * 4);
    assert!(post.render_frame(FrameIndex(600)).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}
