use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zz0000").is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<Color>(json!([0.1, 0.2])).is_err());
}

#[test]
fn parses_hsla_object() {
    let c: Color = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!((c.r - 1.0).abs() < 1e-9);
    assert!((c.g - 0.0).abs() < 1e-9);
    assert!((c.b - 0.0).abs() < 1e-9);
}

#[test]
fn serializes_as_hex() {
    let v = serde_json::to_value(Color::rgb8(0xff, 0x99, 0x11)).unwrap();
    assert_eq!(v, json!("#ff9911"));
    let v = serde_json::to_value(Color::rgba(0.0, 0.0, 0.0, 0.0)).unwrap();
    assert_eq!(v, json!("#00000000"));
}

#[test]
fn svg_rgb_drops_alpha() {
    let c = Color::from_hex("#392F5A80").unwrap();
    assert_eq!(c.to_svg_rgb(), "#392f5a");
}

#[test]
fn lerp_hits_endpoints() {
    let a = Color::BLACK;
    let b = Color::WHITE;
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5).to_rgba8(), [128, 128, 128, 255]);
}
