use super::*;
use serde_json::json;

fn minimal() -> serde_json::Value {
    json!({
        "image": "bg.jpg",
        "sound": "https://x.io/track.mp3",
        "quotes": ["الصبر مفتاح الفرج"],
        "style": { "font": "fonts/Amiri-Bold.ttf" }
    })
}

#[test]
fn defaults_match_the_picker_defaults() {
    let cfg: PostConfig = serde_json::from_value(minimal()).unwrap();
    assert_eq!(cfg.style.color, Rgba8::WHITE);
    assert_eq!(cfg.style.font_size, 40);
    assert_eq!(cfg.style.duration_secs, 20);
    assert_eq!(cfg.style.animation, AnimationKind::None);
    assert_eq!(cfg.style.fit, BackgroundFit::Stretch);
    assert_eq!(cfg.canvas, Canvas::REFERENCE);
    assert_eq!(cfg.fps, 30);
    cfg.validate().unwrap();
}

#[test]
fn validation_requires_every_selection() {
    let mut v = minimal();
    v.as_object_mut().unwrap().remove("image");
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert!(cfg.validate().unwrap_err().to_string().contains("image"));

    let mut v = minimal();
    v.as_object_mut().unwrap().remove("sound");
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert!(cfg.validate().unwrap_err().to_string().contains("sound"));
    cfg.validate_for_still().unwrap();

    let mut v = minimal();
    v["quotes"] = json!(["  ", ""]);
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert!(cfg.validate().unwrap_err().to_string().contains("quotes"));
}

#[test]
fn validation_rejects_zero_scalars() {
    let mut v = minimal();
    v["style"]["duration_secs"] = json!(0);
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert!(cfg.validate().is_err());

    let mut v = minimal();
    v["fps"] = json!(0);
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert!(cfg.validate().is_err());

    // Off-preset durations are allowed.
    let mut v = minimal();
    v["style"]["duration_secs"] = json!(7);
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    cfg.validate().unwrap();
}

#[test]
fn style_fields_parse_from_names() {
    let mut v = minimal();
    v["style"]["animation"] = json!("butterflies");
    v["style"]["color"] = json!("#DA70D6");
    v["style"]["fit"] = json!("cover");
    v["category"] = json!("hikam");
    let cfg: PostConfig = serde_json::from_value(v).unwrap();
    assert_eq!(cfg.style.animation, AnimationKind::Butterflies);
    assert_eq!(cfg.style.color, presets::color_by_name("violet").unwrap());
    assert_eq!(cfg.style.fit, BackgroundFit::Cover);
    assert_eq!(cfg.category, Some(QuoteCategory::Hikam));

    let mut v = minimal();
    v["style"]["animation"] = json!("lava");
    assert!(serde_json::from_value::<PostConfig>(v).is_err());
}

#[test]
fn from_path_resolves_relative_sources() {
    let dir = std::env::temp_dir().join(format!("postreel_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("post.json");
    std::fs::write(&path, serde_json::to_vec(&minimal()).unwrap()).unwrap();

    let cfg = PostConfig::from_path(&path).unwrap();
    assert_eq!(cfg.image, Some(MediaSource::Path(dir.join("bg.jpg"))));
    assert_eq!(
        cfg.sound,
        Some(MediaSource::Url("https://x.io/track.mp3".to_string()))
    );
    assert_eq!(cfg.style.font, dir.join("fonts/Amiri-Bold.ttf"));

    std::fs::write(&path, b"{ not json").unwrap();
    assert!(
        PostConfig::from_path(&path)
            .unwrap_err()
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn presets_cover_the_picker_options() {
    assert!(presets::is_preset_duration(20));
    assert!(presets::is_preset_duration(60));
    assert!(!presets::is_preset_duration(45));
    assert_eq!(presets::FONT_SIZES.len(), 6);
    assert_eq!(presets::COLORS.len(), 10);
    assert_eq!(presets::ARABIC_FONTS.len(), 20);
    assert_eq!(presets::color_by_name(" Gold "), Some(Rgba8::rgb(0xFF, 0xA5, 0)));
}
