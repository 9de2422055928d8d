use super::*;

fn base() -> image::DynamicImage {
    image::DynamicImage::new_rgba8(8, 8)
}

#[test]
fn builder_defaults_match_serde_defaults() {
    let cfg = StampConfigBuilder::with_base_raster(base()).build().unwrap();
    assert!(cfg.stamp.is_none());
    assert_eq!(cfg.anchor, Anchor::Center);
    assert_eq!(cfg.position, PixelOffset::default());
    assert_eq!(cfg.margin, PixelOffset::default());
    assert_eq!(cfg.rotation_deg, 0.0);
    assert_eq!(cfg.alpha, 255);

    let json = StampConfig::from_json_str(r#"{"base":{"Resource":"b.png"}}"#).unwrap();
    assert_eq!(json.anchor, cfg.anchor);
    assert_eq!(json.alpha, cfg.alpha);
}

#[test]
fn builder_sets_every_field() {
    let cfg = StampConfigBuilder::with_base_resource("base.png")
        .text(text_stamp("hi").size_px(12.0).color_rgba8([1, 2, 3, 4]))
        .anchor(Anchor::Custom)
        .position(3, 4)
        .margin(-1, 2)
        .rotation_deg(15.0)
        .alpha(128)
        .build()
        .unwrap();

    assert_eq!(cfg.anchor, Anchor::Custom);
    assert_eq!(cfg.position, PixelOffset::new(3, 4));
    assert_eq!(cfg.margin, PixelOffset::new(-1, 2));
    assert_eq!(cfg.rotation_deg, 15.0);
    assert_eq!(cfg.opacity(), Some(128));
    let Some(StampPayload::Text(t)) = &cfg.stamp else {
        panic!("expected text payload");
    };
    assert_eq!(t.text, "hi");
    assert_eq!(t.size_px, 12.0);
    assert_eq!(t.color_rgba8, [1, 2, 3, 4]);
}

#[test]
fn text_and_image_together_are_rejected() {
    let err = StampConfigBuilder::with_base_raster(base())
        .text(text_stamp("a"))
        .image(ImageStamp::Resource("logo.png".to_string()))
        .build()
        .unwrap_err();
    assert!(matches!(err, StampError::Validation(_)));
}

#[test]
fn build_runs_validation() {
    let err = StampConfigBuilder::with_base_raster(base())
        .text(text_stamp("a").size_px(-3.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, StampError::Validation(_)));

    let err = StampConfigBuilder::with_base_raster(base())
        .rotation_deg(f32::INFINITY)
        .build()
        .unwrap_err();
    assert!(matches!(err, StampError::Validation(_)));
}

#[test]
fn text_stamp_helpers_fill_optional_parts() {
    let t = text_stamp("x")
        .font_source("fonts/a.ttf")
        .linear_gradient([0.0, 0.0], [10.0, 0.0], vec![[255, 0, 0, 255], [0, 0, 255, 255]])
        .shadow(2.0, 3.0, 1.5, [0, 0, 0, 128])
        .background_rgba8([9, 9, 9, 255]);
    assert_eq!(t.font_source.as_deref(), Some("fonts/a.ttf"));
    assert!(matches!(t.shader, Some(TextShader::LinearGradient { .. })));
    assert_eq!(t.shadow.map(|s| s.dy), Some(3.0));
    assert_eq!(t.effective_background(), Some([9, 9, 9, 255]));
}
