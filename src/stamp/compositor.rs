use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::source::{FsImageSource, ImageSource},
    assets::text::{FontLibrary, ParleyShaper, ShapedText, TextRequest, TextShaper},
    config::model::{BaseImage, ImageStamp, StampConfig, StampPayload, TextShader, TextStamp},
    foundation::core::{Affine, Dimensions, PixelOffset, Point, Rect, Rgba8Premul, Vec2},
    foundation::error::{StampError, StampResult},
    foundation::math::alpha_to_opacity,
    layout::position::resolve,
    render::{
        blur::{blur_mask, shadow_blur_params},
        paint::{LinearGradient, Paint, scale_alpha},
        surface::{Pattern, Surface},
    },
};

/// Fixed padding around the text background rectangle, in pixels.
const BACKGROUND_MARGIN: f64 = 10.0;

/// Composites text or image stamps onto base images.
///
/// A `Stamper` owns its collaborators (image lookup and text shaping) but no per-call state:
/// every [`Stamper::add_stamp`] call draws into a private copy of the base image.
pub struct Stamper {
    images: Box<dyn ImageSource>,
    shaper: Box<dyn TextShaper>,
}

impl Stamper {
    pub fn new(images: impl ImageSource + 'static, shaper: impl TextShaper + 'static) -> Self {
        Self {
            images: Box::new(images),
            shaper: Box::new(shaper),
        }
    }

    /// Filesystem-backed stamper: images and fonts are resolved relative to `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::new(
            FsImageSource::new(root.clone()),
            ParleyShaper::new(FontLibrary::new(root)),
        )
    }

    /// Stamp `config`'s payload onto a copy of its base image.
    ///
    /// Returns `Ok(None)` when the base image cannot be obtained, and an unmodified copy when
    /// there is nothing to draw. The result always has the base image's dimensions and colour
    /// type.
    #[tracing::instrument(skip(self, config), fields(anchor = %config.anchor))]
    pub fn add_stamp(&mut self, config: &StampConfig) -> StampResult<Option<image::DynamicImage>> {
        config.validate()?;

        let Some(base) = self.resolve_base(&config.base) else {
            return Ok(None);
        };
        let Some(payload) = config.effective_stamp() else {
            tracing::debug!("no stamp payload; returning unmodified copy");
            return Ok(Some(base.as_ref().clone()));
        };

        let mut canvas = Surface::from_rgba_image(&base.to_rgba8());
        match payload {
            StampPayload::Text(text) => self.draw_text_stamp(&mut canvas, config, text)?,
            StampPayload::Image(stamp) => {
                let stamp = self.resolve_stamp_image(stamp)?;
                draw_image_stamp(&mut canvas, config, &stamp)?;
            }
        }

        let out = canvas.to_rgba_image()?;
        Ok(Some(with_color_type(out, base.color())))
    }

    fn resolve_base(&mut self, base: &BaseImage) -> Option<Arc<image::DynamicImage>> {
        match base {
            BaseImage::Raster(img) => Some(img.clone()),
            BaseImage::Resource(id) => {
                let img = self.images.load_image(id);
                if img.is_none() {
                    tracing::warn!(id = id.as_str(), "base image unavailable");
                }
                img
            }
        }
    }

    fn resolve_stamp_image(&mut self, stamp: &ImageStamp) -> StampResult<Arc<image::DynamicImage>> {
        match stamp {
            ImageStamp::Raster(img) => Ok(img.clone()),
            ImageStamp::Resource(id) => self
                .images
                .load_image(id)
                .ok_or_else(|| StampError::asset(format!("stamp image '{id}' is unavailable"))),
        }
    }

    #[tracing::instrument(skip_all, fields(len = text.text.len()))]
    fn draw_text_stamp(
        &mut self,
        canvas: &mut Surface,
        config: &StampConfig,
        text: &TextStamp,
    ) -> StampResult<()> {
        let shaped = self.shaper.shape(&TextRequest {
            text: &text.text,
            font_source: text.font_source.as_deref(),
            size_px: text.size_px,
        })?;
        let bounds = shaped.bounds;

        let box_dims = Dimensions::new(
            u32::try_from(bounds.width()).unwrap_or(0),
            u32::try_from(bounds.height()).unwrap_or(0),
        );
        let at = placement(config, canvas.dimensions(), box_dims).offset_by(config.margin);
        let pivot = Point::new(
            f64::from(at.x) + bounds.exact_center_x(),
            f64::from(at.y) - bounds.exact_center_y(),
        );
        let transform = rotation_about(config.rotation_deg, pivot);
        tracing::debug!(x = at.x, y = at.y, ?bounds, advance = shaped.advance, "text placement");

        if config.anchor.is_tile() {
            return draw_text_tile(canvas, config, text, &shaped, transform);
        }

        let opacity = config.opacity();
        let background = text.effective_background().map(|color| {
            let (sdx, sdy) = text
                .shadow
                .map_or((0.0, 0.0), |s| (f64::from(s.dx), f64::from(s.dy)));
            let descent = f64::from(shaped.descent);
            let (x, y) = (f64::from(at.x), f64::from(at.y));
            (
                Rect::new(
                    x - BACKGROUND_MARGIN,
                    y - f64::from(bounds.height()) - descent - BACKGROUND_MARGIN,
                    x + f64::from(shaped.advance) + sdx + BACKGROUND_MARGIN,
                    y + sdy + descent + BACKGROUND_MARGIN,
                ),
                Rgba8Premul::from_straight(color),
            )
        });

        let mask = &shaped.mask;
        let glyph_rect = mask_rect(&shaped, at);
        let shadow = text.shadow.filter(|s| s.is_visible()).map(|s| {
            let (kernel, sigma) = shadow_blur_params(s.blur_radius);
            let offset = Vec2::new(f64::from(s.dx).round(), f64::from(s.dy).round());
            let rect = (glyph_rect + offset).inflate(f64::from(kernel), f64::from(kernel));
            (s, kernel, sigma, offset, rect)
        });

        // The layer covers exactly what this stamp touches; rotation is applied when it is
        // composited onto the canvas.
        let mut extent = glyph_rect;
        if let Some((rect, _)) = &background {
            extent = extent.union(*rect);
        }
        if let Some((_, _, _, _, rect)) = &shadow {
            extent = extent.union(*rect);
        }
        let extent = extent.expand();
        let layer_w = u32::try_from(extent.width() as i64)
            .map_err(|_| StampError::render("text layer width out of range"))?;
        let layer_h = u32::try_from(extent.height() as i64)
            .map_err(|_| StampError::render("text layer height out of range"))?;
        if layer_w == 0 || layer_h == 0 {
            return Ok(());
        }
        let layer_origin = Vec2::new(extent.x0, extent.y0);
        let mut layer = Surface::new(layer_w, layer_h);

        if let Some((rect, color)) = background {
            layer.fill_rect(rect - layer_origin, color);
        }

        let pen_x = i64::from(at.x) - extent.x0 as i64;
        let pen_y = i64::from(at.y) - extent.y0 as i64;

        if let Some((s, kernel, sigma, offset, _)) = shadow {
            let soft = blur_mask(mask, kernel, sigma)?;
            layer.draw_mask(
                &soft,
                pen_x + offset.x as i64,
                pen_y + offset.y as i64,
                &Paint::solid(s.color_rgba8, opacity),
                Vec2::ZERO,
            );
        }

        layer.draw_mask(mask, pen_x, pen_y, &text_paint(text, opacity), layer_origin);

        canvas.draw_transformed(&layer, layer_origin.to_point(), transform, 1.0);
        Ok(())
    }
}

/// Resolved or explicit position before margins are applied.
fn placement(config: &StampConfig, canvas: Dimensions, stamp: Dimensions) -> PixelOffset {
    if config.anchor.is_custom() {
        config.position
    } else {
        resolve(config.anchor, canvas, stamp)
    }
}

/// Clockwise rotation by `deg` around `pivot`; identity when there is no rotation.
fn rotation_about(deg: f32, pivot: Point) -> Affine {
    if deg == 0.0 {
        return Affine::IDENTITY;
    }
    Affine::rotate_about(f64::from(deg).to_radians(), pivot)
}

/// Drawing-space box of the glyph mask when its pen origin sits at `at`.
fn mask_rect(shaped: &ShapedText, at: PixelOffset) -> Rect {
    let mask = &shaped.mask;
    let x0 = f64::from(at.x) - f64::from(mask.origin_x);
    let y0 = f64::from(at.y) - f64::from(mask.origin_y);
    Rect::new(
        x0,
        y0,
        x0 + f64::from(mask.width),
        y0 + f64::from(mask.height),
    )
}

fn text_paint(text: &TextStamp, opacity: Option<u8>) -> Paint {
    match &text.shader {
        None => Paint::solid(text.color_rgba8, opacity),
        Some(TextShader::LinearGradient {
            start,
            end,
            colors_rgba8,
        }) => Paint::LinearGradient(LinearGradient {
            start: Point::new(f64::from(start[0]), f64::from(start[1])),
            end: Point::new(f64::from(end[0]), f64::from(end[1])),
            stops_rgba8: colors_rgba8.clone(),
            alpha: scale_alpha(text.color_rgba8[3], opacity),
        }),
    }
}

/// Render the text once at baseline `bounds.height()` into an `advance x height` tile and
/// repeat it over the whole canvas. Background and shadow are not drawn in this mode.
///
/// `alpha` fades the glyphs inside the tile and again when the pattern is filled.
fn draw_text_tile(
    canvas: &mut Surface,
    config: &StampConfig,
    text: &TextStamp,
    shaped: &ShapedText,
    transform: Affine,
) -> StampResult<()> {
    let tile_w = if shaped.advance.is_finite() && shaped.advance > 0.0 {
        shaped.advance as u32
    } else {
        0
    };
    let tile_h = u32::try_from(shaped.bounds.height()).unwrap_or(0);
    if tile_w == 0 || tile_h == 0 {
        tracing::debug!(tile_w, tile_h, "empty text tile; nothing to repeat");
        return Ok(());
    }

    let mut tile = Surface::new(tile_w, tile_h);
    tile.draw_mask(
        &shaped.mask,
        0,
        i64::from(tile_h),
        &text_paint(text, config.opacity()),
        Vec2::ZERO,
    );
    let pattern = Pattern::repeat(tile)?;
    canvas.fill_pattern(&pattern, transform, opacity_of(config));
    Ok(())
}

#[tracing::instrument(skip_all, fields(w = stamp.width(), h = stamp.height()))]
fn draw_image_stamp(
    canvas: &mut Surface,
    config: &StampConfig,
    stamp: &image::DynamicImage,
) -> StampResult<()> {
    let layer = Surface::from_rgba_image(&stamp.to_rgba8());
    let dims = layer.dimensions();

    // Images are placed by their top-left corner while the resolver reports the bottom edge.
    let top_left = if config.anchor.is_custom() {
        config.position
    } else {
        let p = resolve(config.anchor, canvas.dimensions(), dims);
        PixelOffset::new(p.x, p.y.saturating_sub(dims.height_i32()))
    };
    let at = top_left.offset_by(config.margin);

    let pivot = Point::new(
        f64::from(at.x.saturating_add(dims.width_i32() / 2)),
        f64::from(at.y.saturating_add(dims.height_i32() / 2)),
    );
    let transform = rotation_about(config.rotation_deg, pivot);
    let opacity = opacity_of(config);

    if config.anchor.is_tile() {
        if layer.is_empty() {
            tracing::debug!("empty stamp image; nothing to repeat");
            return Ok(());
        }
        let pattern = Pattern::repeat(layer)?;
        canvas.fill_pattern(&pattern, transform, opacity);
    } else {
        tracing::debug!(x = at.x, y = at.y, "image placement");
        canvas.draw_transformed(
            &layer,
            Point::new(f64::from(at.x), f64::from(at.y)),
            transform,
            opacity,
        );
    }
    Ok(())
}

fn opacity_of(config: &StampConfig) -> f32 {
    config.opacity().map_or(1.0, alpha_to_opacity)
}

/// Convert the composited RGBA8 result back to the base image's colour type.
fn with_color_type(out: image::RgbaImage, color: image::ColorType) -> image::DynamicImage {
    use image::{ColorType, DynamicImage};

    let img = DynamicImage::ImageRgba8(out);
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        _ => img,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stamp/compositor.rs"]
mod tests;
