use crate::{
    foundation::error::{StampError, StampResult},
    render::mask::GlyphMask,
};

/// Gaussian parameters for a shadow of the given blur `radius`.
///
/// Returns `(kernel_radius_px, sigma)`; a non-positive radius yields a zero kernel radius.
pub fn shadow_blur_params(radius: f32) -> (u32, f32) {
    if !radius.is_finite() || radius <= 0.0 {
        return (0, 0.0);
    }
    let sigma = radius * 0.57735 + 0.5;
    ((sigma * 3.0).ceil() as u32, sigma)
}

/// Soften a glyph coverage mask with a separable Gaussian of `radius` taps per side.
///
/// The result grows by `radius` on every edge so the falloff is never clipped, and its pen
/// origin moves with it: drawing the blurred mask at the same pen position centres the soft
/// shadow on the sharp glyphs. Coverage outside the source counts as zero.
pub fn blur_mask(mask: &GlyphMask, radius: u32, sigma: f32) -> StampResult<GlyphMask> {
    if radius == 0 || mask.width == 0 || mask.height == 0 {
        return Ok(mask.clone());
    }
    let weights = gaussian_weights(radius, sigma)?;

    let r = radius as usize;
    let (src_w, src_h) = (mask.width as usize, mask.height as usize);
    let out_w = src_w + 2 * r;
    let out_h = src_h + 2 * r;
    let grow = |v: i32| {
        i32::try_from(radius)
            .ok()
            .and_then(|r| v.checked_add(r))
            .ok_or_else(|| StampError::render("blurred mask origin out of range"))
    };
    let origin_x = grow(mask.origin_x)?;
    let origin_y = grow(mask.origin_y)?;
    let width = u32::try_from(out_w).map_err(|_| StampError::render("blurred mask too wide"))?;
    let height = u32::try_from(out_h).map_err(|_| StampError::render("blurred mask too tall"))?;

    // Each source sample spreads into the taps around it; zero rows and columns are skipped.
    let mut rows = vec![0f32; out_w * src_h];
    for y in 0..src_h {
        let src_row = &mask.coverage[y * src_w..(y + 1) * src_w];
        let dst_row = &mut rows[y * out_w..(y + 1) * out_w];
        for (x, &c) in src_row.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let c = f32::from(c);
            for (k, w) in weights.iter().enumerate() {
                dst_row[x + k] += c * w;
            }
        }
    }

    let mut acc = vec![0f32; out_w * out_h];
    for y in 0..src_h {
        for x in 0..out_w {
            let c = rows[y * out_w + x];
            if c == 0.0 {
                continue;
            }
            for (k, w) in weights.iter().enumerate() {
                acc[(y + k) * out_w + x] += c * w;
            }
        }
    }

    let coverage = acc
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    GlyphMask::new(width, height, origin_x, origin_y, coverage)
}

/// Normalized Gaussian taps for offsets `-radius..=radius`.
fn gaussian_weights(radius: u32, sigma: f32) -> StampResult<Vec<f32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StampError::render("shadow blur sigma must be finite and > 0"));
    }
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (-r..=r)
        .map(|i| {
            let x = i as f32;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f32 = raw.iter().sum();
    if sum <= 0.0 {
        return Err(StampError::render("shadow blur kernel sums to zero"));
    }
    Ok(raw.into_iter().map(|w| w / sum).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
