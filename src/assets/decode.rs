use anyhow::Context;

use crate::{
    foundation::error::{StampError, StampResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// Decode an encoded raster (PNG, JPEG, ...) into an image in its native colour type.
pub fn decode_image(bytes: &[u8]) -> StampResult<image::DynamicImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img)
}

/// Parse an SVG document and rasterize it at its intrinsic size.
pub fn rasterize_svg(bytes: &[u8]) -> StampResult<image::DynamicImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let to_px = |v: f32| -> StampResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(StampError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    };
    let (width, height) = (to_px(size.width())?, to_px(size.height())?);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StampError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| StampError::render("svg pixmap size mismatch"))?;
    Ok(image::DynamicImage::ImageRgba8(img))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
