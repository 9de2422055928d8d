use stamper::{Anchor, FontLibrary, MemoryImageSource, ParleyShaper, StampConfigBuilder, Stamper};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let base = image::RgbImage::from_fn(480, 320, |x, y| {
        image::Rgb([(x / 2) as u8, (y * 255 / 320) as u8, 160])
    });

    let mut engine = Stamper::new(
        MemoryImageSource::new(),
        ParleyShaper::new(FontLibrary::system_only()),
    );

    let cases = [
        ("bottom_right", Anchor::BottomRight, 0.0, 255),
        ("center_rotated", Anchor::Center, -20.0, 200),
        ("tiled", Anchor::Tile, -30.0, 90),
    ];

    std::fs::create_dir_all("target/demos")?;
    for (name, anchor, rotation, alpha) in cases {
        let config = StampConfigBuilder::with_base_raster(image::DynamicImage::ImageRgb8(
            base.clone(),
        ))
        .text(
            stamper::text_stamp("CONFIDENTIAL")
                .size_px(36.0)
                .color_rgba8([255, 255, 255, 255])
                .shadow(2.0, 2.0, 3.0, [0, 0, 0, 180])
                .background_rgba8([20, 20, 20, 120]),
        )
        .anchor(anchor)
        .margin(-12, -12)
        .rotation_deg(rotation)
        .alpha(alpha)
        .build()?;

        let Some(out) = engine.add_stamp(&config)? else {
            anyhow::bail!("base image unavailable");
        };
        let path = format!("target/demos/watermark_{name}.png");
        out.save(&path)?;
        println!("wrote {path}");
    }

    Ok(())
}
