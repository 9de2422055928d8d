use super::*;

fn text_cfg(text: &str) -> StampConfig {
    StampConfig {
        base: BaseImage::Resource("base.png".to_string()),
        stamp: Some(StampPayload::Text(TextStamp {
            text: text.to_string(),
            font_source: None,
            size_px: 20.0,
            color_rgba8: [0, 0, 0, 255],
            shader: None,
            shadow: None,
            background_rgba8: None,
        })),
        anchor: Anchor::BottomRight,
        position: PixelOffset::default(),
        margin: PixelOffset::new(-4, -4),
        rotation_deg: 0.0,
        alpha: 255,
    }
}

#[test]
fn minimal_json_gets_defaults() {
    let cfg = StampConfig::from_json_str(
        r#"{
            "base": {"Resource": "photo.png"},
            "stamp": {"Text": {"text": "hello"}}
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.anchor, Anchor::Center);
    assert_eq!(cfg.alpha, 255);
    assert_eq!(cfg.rotation_deg, 0.0);
    let Some(StampPayload::Text(t)) = cfg.stamp else {
        panic!("expected text");
    };
    assert_eq!(t.size_px, 40.0);
    assert_eq!(t.color_rgba8, [0, 0, 0, 255]);
    assert!(t.font_source.is_none());
}

#[test]
fn full_json_parses_every_field() {
    let cfg = StampConfig::from_json_str(
        r#"{
            "base": {"Resource": "photo.png"},
            "stamp": {"Text": {
                "text": "Draft",
                "font_source": "fonts/Inter.ttf",
                "size_px": 32,
                "color_rgba8": [255, 0, 0, 200],
                "shader": {"LinearGradient": {
                    "start": [0, 0], "end": [100, 0],
                    "colors_rgba8": [[255, 0, 0, 255], [0, 0, 255, 255]]
                }},
                "shadow": {"dx": 2, "dy": 2, "blur_radius": 3, "color_rgba8": [0, 0, 0, 128]},
                "background_rgba8": [255, 255, 255, 255]
            }},
            "anchor": "BottomLeft",
            "position": {"x": 1, "y": 2},
            "margin": {"x": 5, "y": -5},
            "rotation_deg": 30,
            "alpha": 300
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.anchor, Anchor::BottomLeft);
    assert_eq!(cfg.margin, PixelOffset::new(5, -5));
    assert_eq!(cfg.opacity(), None);
    let Some(StampPayload::Text(t)) = &cfg.stamp else {
        panic!("expected text");
    };
    assert!(t.shadow.is_some_and(|s| s.is_visible()));
    assert_eq!(t.effective_background(), Some([255, 255, 255, 255]));
}

#[test]
fn image_payload_parses() {
    let cfg = StampConfig::from_json_str(
        r#"{"base": {"Resource": "a.png"}, "stamp": {"Image": {"Resource": "logo.svg"}}, "anchor": "Tile"}"#,
    )
    .unwrap();
    assert!(matches!(
        cfg.stamp,
        Some(StampPayload::Image(ImageStamp::Resource(ref id))) if id == "logo.svg"
    ));
    assert!(cfg.anchor.is_tile());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = StampConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, StampError::Serde(_)));
    let err = StampConfig::from_json_str(r#"{"stamp": null}"#).unwrap_err();
    assert!(matches!(err, StampError::Serde(_)));
}

#[test]
fn opacity_only_in_byte_range() {
    let mut cfg = text_cfg("x");
    for (alpha, expected) in [(0, Some(0)), (128, Some(128)), (255, Some(255)), (-1, None), (256, None)] {
        cfg.alpha = alpha;
        assert_eq!(cfg.opacity(), expected, "alpha={alpha}");
    }
}

#[test]
fn empty_text_is_no_payload() {
    assert!(text_cfg("").effective_stamp().is_none());
    assert!(text_cfg("x").effective_stamp().is_some());
}

#[test]
fn transparent_black_background_is_unset() {
    let mut t = match text_cfg("x").stamp {
        Some(StampPayload::Text(t)) => t,
        _ => unreachable!(),
    };
    t.background_rgba8 = Some([0, 0, 0, 0]);
    assert_eq!(t.effective_background(), None);
    t.background_rgba8 = Some([0, 0, 0, 1]);
    assert_eq!(t.effective_background(), Some([0, 0, 0, 1]));
}

#[test]
fn validation_rejects_bad_inputs() {
    let mut cfg = text_cfg("x");
    cfg.rotation_deg = f32::NAN;
    assert!(matches!(cfg.validate(), Err(StampError::Validation(_))));

    let mut cfg = text_cfg("x");
    if let Some(StampPayload::Text(t)) = &mut cfg.stamp {
        t.size_px = 0.0;
    }
    assert!(cfg.validate().is_err());

    let mut cfg = text_cfg("x");
    if let Some(StampPayload::Text(t)) = &mut cfg.stamp {
        t.shadow = Some(TextShadow {
            dx: 1.0,
            dy: 1.0,
            blur_radius: -2.0,
            color_rgba8: [0, 0, 0, 255],
        });
    }
    assert!(cfg.validate().is_err());

    let mut cfg = text_cfg("x");
    if let Some(StampPayload::Text(t)) = &mut cfg.stamp {
        t.shader = Some(TextShader::LinearGradient {
            start: [0.0, 0.0],
            end: [1.0, 0.0],
            colors_rgba8: vec![[0, 0, 0, 255]],
        });
    }
    assert!(cfg.validate().is_err());

    let mut cfg = text_cfg("x");
    cfg.stamp = Some(StampPayload::Image(ImageStamp::Resource("  ".to_string())));
    assert!(cfg.validate().is_err());

    let mut cfg = text_cfg("x");
    cfg.base = BaseImage::Resource(String::new());
    assert!(cfg.validate().is_err());
}

#[test]
fn json_roundtrip_preserves_placement() {
    let cfg = text_cfg("hello");
    let json = cfg.to_json_pretty().unwrap();
    let back = StampConfig::from_json_str(&json).unwrap();
    assert_eq!(back.anchor, cfg.anchor);
    assert_eq!(back.margin, cfg.margin);
    assert_eq!(back.alpha, cfg.alpha);
}

#[test]
fn from_path_reports_missing_file() {
    let err = StampConfig::from_path("target/definitely/missing/stamp.json").unwrap_err();
    assert!(matches!(err, StampError::Other(_)));
}
