use super::*;

#[test]
fn dimensions_parse_accepts_both_separators() {
    assert_eq!(Dimensions::parse("100x50").unwrap(), Dimensions::new(100, 50));
    assert_eq!(Dimensions::parse("7X3").unwrap(), Dimensions::new(7, 3));
    assert!(Dimensions::parse("100").is_err());
    assert!(Dimensions::parse("ax3").is_err());
}

#[test]
fn pixel_offset_adds_componentwise() {
    let p = PixelOffset::new(10, 20).offset_by(PixelOffset::new(5, -5));
    assert_eq!(p, PixelOffset::new(15, 15));
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Rgba8Premul::from_straight([200, 100, 50, 128]);
    assert_eq!(c.to_array(), [100, 50, 25, 128]);
    assert_eq!(
        Rgba8Premul::from_straight([255, 0, 0, 255]).to_array(),
        [255, 0, 0, 255]
    );
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
