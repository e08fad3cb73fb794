use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!("#FFD700".parse::<Rgba8>().unwrap(), Rgba8::rgb(255, 215, 0));
    assert_eq!("#fff".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
    assert_eq!("1e90ff".parse::<Rgba8>().unwrap(), Rgba8::rgb(30, 144, 255));

    let c = "#00000066".parse::<Rgba8>().unwrap();
    assert_eq!(c.a, 0x66);

    assert!("#12345".parse::<Rgba8>().is_err());
    assert!("#GGGGGG".parse::<Rgba8>().is_err());
}

#[test]
fn serde_roundtrips_as_hex_and_accepts_objects() {
    let c: Rgba8 = serde_json::from_value(json!("#FF1493")).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#FF1493"));

    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
}

#[test]
fn opacity_and_premul() {
    let c = Rgba8::WHITE.with_opacity(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(c.to_premul(), [128, 128, 128, 128]);
    assert_eq!(Rgba8::BLACK.with_opacity(0.4).to_premul(), [0, 0, 0, 102]);
}
