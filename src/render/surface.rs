use crate::{
    foundation::core::{Affine, Dimensions, Point, Rect, Rgba8Premul, Vec2},
    foundation::error::{StampError, StampResult},
    foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    render::{
        composite::{PremulRgba8, over, scale},
        mask::GlyphMask,
        paint::Paint,
    },
};

/// Owned premultiplied RGBA8 raster that stamps are drawn into.
///
/// All draws clip against the surface bounds; nothing is relocated to stay visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> StampResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(StampError::render(
                "surface bytes must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy a straight-alpha image into a new premultiplied surface.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy of this surface.
    pub fn to_rgba_image(&self) -> StampResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| StampError::render("surface bytes do not match its dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, transparent outside the surface.
    pub fn pixel(&self, x: i64, y: i64) -> PremulRgba8 {
        match self.index(x, y) {
            Some(i) => [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ],
            None => [0, 0, 0, 0],
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + x as usize) * 4)
    }

    fn blend(&mut self, x: i64, y: i64, src: PremulRgba8, opacity: f32) {
        if let Some(i) = self.index(x, y) {
            let dst = [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ];
            self.data[i..i + 4].copy_from_slice(&over(dst, src, opacity));
        }
    }

    /// Fill every pixel whose centre lies inside `rect`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        let rect = rect.abs();
        let x0 = (rect.x0 - 0.5).ceil().max(0.0) as i64;
        let y0 = (rect.y0 - 0.5).ceil().max(0.0) as i64;
        let x1 = ((rect.x1 - 0.5).ceil() as i64).min(i64::from(self.width));
        let y1 = ((rect.y1 - 0.5).ceil() as i64).min(i64::from(self.height));
        let src = color.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, src, 1.0);
            }
        }
    }

    /// Paint glyph coverage with its pen origin at `(pen_x, pen_y)`.
    ///
    /// `paint_offset` maps surface pixels into the paint's coordinate space, so gradients stay
    /// anchored to the stamp's drawing space when drawing into an offset layer.
    pub fn draw_mask(
        &mut self,
        mask: &GlyphMask,
        pen_x: i64,
        pen_y: i64,
        paint: &Paint,
        paint_offset: Vec2,
    ) {
        let left = pen_x - i64::from(mask.origin_x);
        let top = pen_y - i64::from(mask.origin_y);
        for my in 0..mask.height {
            for mx in 0..mask.width {
                let cov = mask.coverage_at(mx, my);
                if cov == 0 {
                    continue;
                }
                let (x, y) = (left + i64::from(mx), top + i64::from(my));
                if self.index(x, y).is_none() {
                    continue;
                }
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5) + paint_offset;
                let src = scale(paint.color_at(p), cov);
                self.blend(x, y, src, 1.0);
            }
        }
    }

    /// Source-over `src` with its top-left corner at integer `(x, y)`.
    pub fn draw_surface(&mut self, src: &Surface, x: i64, y: i64, opacity: f32) {
        for sy in 0..i64::from(src.height) {
            let dy = y + sy;
            if dy < 0 || dy >= i64::from(self.height) {
                continue;
            }
            for sx in 0..i64::from(src.width) {
                let dx = x + sx;
                if dx < 0 || dx >= i64::from(self.width) {
                    continue;
                }
                self.blend(dx, dy, src.pixel(sx, sy), opacity);
            }
        }
    }

    /// Source-over `src` placed at `origin` and then mapped through `transform`.
    ///
    /// Identity transforms with an integral origin take the exact copy path; anything else
    /// inverse-maps destination pixel centres and samples `src` bilinearly.
    pub fn draw_transformed(&mut self, src: &Surface, origin: Point, transform: Affine, opacity: f32) {
        if src.is_empty() {
            return;
        }
        if transform == Affine::IDENTITY && origin.x.fract() == 0.0 && origin.y.fract() == 0.0 {
            self.draw_surface(src, origin.x as i64, origin.y as i64, opacity);
            return;
        }

        let full = transform * Affine::translate(origin.to_vec2());
        let bbox = full.transform_rect_bbox(Rect::new(
            0.0,
            0.0,
            f64::from(src.width),
            f64::from(src.height),
        ));
        let inv = full.inverse();
        let x0 = bbox.x0.floor().max(0.0) as i64;
        let y0 = bbox.y0.floor().max(0.0) as i64;
        let x1 = (bbox.x1.ceil() as i64).min(i64::from(self.width));
        let y1 = (bbox.y1.ceil() as i64).min(i64::from(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                let p = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let px = src.sample_bilinear(p.x - 0.5, p.y - 0.5);
                self.blend(x, y, px, opacity);
            }
        }
    }

    /// Cover every pixel of this surface with `pattern`, seen through `transform`.
    pub fn fill_pattern(&mut self, pattern: &Pattern, transform: Affine, opacity: f32) {
        let inv = (transform != Affine::IDENTITY).then(|| transform.inverse());
        for y in 0..i64::from(self.height) {
            for x in 0..i64::from(self.width) {
                let (u, v) = match inv {
                    None => (x, y),
                    Some(inv) => {
                        let p = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                        (p.x.floor() as i64, p.y.floor() as i64)
                    }
                };
                self.blend(x, y, pattern.sample(u, v), opacity);
            }
        }
    }

    fn sample_bilinear(&self, fx: f64, fy: f64) -> PremulRgba8 {
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let taps = [
            (self.pixel(x0, y0), (1.0 - tx) * (1.0 - ty)),
            (self.pixel(x0 + 1, y0), tx * (1.0 - ty)),
            (self.pixel(x0, y0 + 1), (1.0 - tx) * ty),
            (self.pixel(x0 + 1, y0 + 1), tx * ty),
        ];
        let mut out = [0u8; 4];
        for (c, slot) in out.iter_mut().enumerate() {
            let v: f32 = taps.iter().map(|(px, w)| f32::from(px[c]) * w).sum();
            *slot = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

/// A tile rendered once and replicated in both axes by a repeating sampler.
#[derive(Clone, Debug)]
pub struct Pattern {
    tile: Surface,
}

impl Pattern {
    pub fn repeat(tile: Surface) -> StampResult<Self> {
        if tile.is_empty() {
            return Err(StampError::render("pattern tile must be non-empty"));
        }
        Ok(Self { tile })
    }

    pub fn tile(&self) -> &Surface {
        &self.tile
    }

    /// Tile pixel for pattern-space coordinates `(u, v)`, wrapping in both axes.
    pub fn sample(&self, u: i64, v: i64) -> PremulRgba8 {
        let w = i64::from(self.tile.width);
        let h = i64::from(self.tile.height);
        self.tile.pixel(u.rem_euclid(w), v.rem_euclid(h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
